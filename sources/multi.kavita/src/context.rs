use aidoku::{
	Result,
	alloc::string::{String, ToString},
};

use crate::{
	endpoints::Url,
	settings::{get_api_key, get_api_url, get_base_url, get_page_size},
};

#[derive(Clone)]
pub struct Context {
	pub api_url: String,
	pub base_url: String,
	pub api_key: String,
	pub page_size: usize,
}

impl Context {
	pub fn new() -> Result<Self> {
		Ok(Self {
			api_url: get_api_url()?,
			base_url: get_base_url()?,
			api_key: get_api_key(),
			page_size: get_page_size(),
		})
	}

	pub fn cover_url(&self, series_id: i32) -> String {
		Url::series_cover(&self.api_url, &series_id.to_string(), &self.api_key)
	}
}

#[cfg(test)]
impl Context {
	pub fn demo() -> Self {
		Self {
			api_url: "https://demo.kavitareader.com/api".into(),
			base_url: "https://demo.kavitareader.com".into(),
			api_key: "key".into(),
			page_size: 20,
		}
	}
}
