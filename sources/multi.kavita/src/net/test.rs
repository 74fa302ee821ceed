use super::*;
use aidoku_test::aidoku_test;

#[aidoku_test]
fn bearer_header() {
	assert_eq!(bearer("abc.def.ghi"), "Bearer abc.def.ghi");
}

#[aidoku_test]
fn stored_token_is_reused() {
	clear_authorization();
	settings::set_token("stored.jwt");

	assert_eq!(authorization().ok().as_deref(), Some("Bearer stored.jwt"));
	assert!(is_server_available());

	// served from memory once loaded
	settings::clear_token();
	assert_eq!(authorization().ok().as_deref(), Some("Bearer stored.jwt"));

	clear_authorization();
}

#[aidoku_test]
fn clearing_drops_persisted_token() {
	settings::set_token("stored.jwt");
	assert!(authorization().is_ok());

	clear_authorization();
	assert_eq!(settings::get_token(), None);
	assert!(AUTHORIZATION.read().is_none());
}

#[aidoku_test]
fn missing_api_key_is_an_error() {
	clear_authorization();
	settings::set_api_key("");

	assert!(authorization().is_err());
	assert!(!is_server_available());
}
