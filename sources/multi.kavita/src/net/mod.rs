use aidoku::{
	AidokuError, Result,
	alloc::String,
	imports::net::{Request, Response},
	prelude::*,
};
use serde::{Serialize, de::DeserializeOwned};
use spin::RwLock;

use crate::{endpoints::Url, models::responses::KavitaUser, settings};

const HEADER_AUTH: &str = "Authorization";
const HEADER_CONTENT_TYPE: &str = "Content-Type";
const CONTENT_TYPE_JSON: &str = "application/json";
const AUTH_SCHEME: &str = "Bearer";

/// Header value of the current session, `None` until the API key has been exchanged.
static AUTHORIZATION: RwLock<Option<String>> = RwLock::new(None);

pub trait KavitaRequest {
	fn authed(self) -> Result<Response>;
}

impl KavitaRequest for Request {
	fn authed(self) -> Result<Response> {
		let response = self
			.header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
			.header(HEADER_AUTH, &authorization()?)
			.send()?;

		// The session expired, exchange the key again and retry once
		if response.status_code() == 401 {
			clear_authorization();
			let authorization = authorization()?;
			return Ok(response
				.into_request()
				.header(HEADER_AUTH, &authorization)
				.send()?);
		}

		Ok(response)
	}
}

fn bearer(token: &str) -> String {
	format!("{AUTH_SCHEME} {token}")
}

/// Returns the `Authorization` header value, authenticating with the API key when
/// neither memory nor defaults hold a token.
pub fn authorization() -> Result<String> {
	let cached = (*AUTHORIZATION.read()).clone();
	if let Some(authorization) = cached {
		return Ok(authorization);
	}

	let authorization = match settings::get_token() {
		Some(token) => bearer(&token),
		None => bearer(&authenticate()?),
	};
	*AUTHORIZATION.write() = Some(authorization.clone());
	Ok(authorization)
}

/// Exchanges the API key for a session token and persists it.
fn authenticate() -> Result<String> {
	let api_key = settings::get_api_key();
	if api_key.is_empty() {
		bail!("Missing API key: configure in settings");
	}

	let url = Url::authenticate(&settings::get_api_url()?, &api_key);
	let response = Request::post(&url)?
		.header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
		.send()?;

	let status = response.status_code();
	if status != 200 {
		println!("[kavita] Authentication failed with HTTP {status}");
		bail!("Authentication failed (HTTP {status}): check the server URL and API key");
	}

	let user = response.get_json::<KavitaUser>()?;
	if user.token.is_empty() {
		bail!("Authentication failed: the server returned no token");
	}
	println!("[kavita] Authenticated as {}", user.username);

	settings::set_token(&user.token);
	Ok(user.token)
}

/// Forgets the session, the next request authenticates again.
pub fn clear_authorization() {
	*AUTHORIZATION.write() = None;
	settings::clear_token();
}

pub fn is_server_available() -> bool {
	authorization()
		.map(|authorization| authorization.starts_with("Bearer "))
		.unwrap_or(false)
}

/// Adds the session headers to a request issued by the host, such as cover
/// and page images. Images also carry the API key in the query, so a failed
/// authentication still produces a usable request.
pub fn image_request(url: &str) -> Result<Request> {
	let request = Request::get(url)?;
	Ok(match authorization() {
		Ok(authorization) => request.header(HEADER_AUTH, &authorization),
		Err(_) => request,
	})
}

pub fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
	fetch_json(url, Request::get(url)?)
}

pub fn post_json<T: DeserializeOwned, B: Serialize>(url: &str, body: &B) -> Result<T> {
	let body = serde_json::to_string(body).map_err(AidokuError::message)?;
	fetch_json(url, Request::post(url)?.body(body))
}

/// Sends a POST whose answer carries no payload worth decoding.
pub fn post(url: &str, body: &impl Serialize) -> Result<()> {
	let body = serde_json::to_string(body).map_err(AidokuError::message)?;
	let response = Request::post(url)?.body(body).authed()?;
	check_status(url, &response)
}

fn fetch_json<T: DeserializeOwned>(url: &str, request: Request) -> Result<T> {
	let response = request.authed()?;
	check_status(url, &response)?;
	Ok(response.get_json::<T>()?)
}

fn check_status(url: &str, response: &Response) -> Result<()> {
	let status = response.status_code();
	if status != 200 {
		println!("[kavita] Failed to fetch json results for {url}: HTTP {status}");
		bail!("Request failed with HTTP {status}: {url}");
	}
	Ok(())
}

#[cfg(test)]
mod test;
