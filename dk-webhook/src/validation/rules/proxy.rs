use dk_core::dynakube::proxy_url;
use dk_core::prelude::*;
use futures::FutureExt;
use futures::future::BoxFuture;
use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use url::Url;

use crate::validation::ValidationContext;
use crate::validation::validator::{
    Check,
    Validator,
    error,
};

lazy_static! {
    static ref PROXY_PASSWORD_REGEX: Regex = Regex::new(r##"^[!"#$()*\-./0-9:;<>?@A-Z\[\]^_a-z{|}~]*$"##).unwrap();
}

// Checks an already-resolved proxy value; the empty string means no proxy
pub fn check_proxy_url(proxy: &str) -> String {
    if proxy.is_empty() {
        return String::new();
    }

    let url = match Url::parse(proxy) {
        Ok(url) => url,
        Err(err) => return format!("the proxy URL is invalid: {err}"),
    };

    // The url crate hands back userinfo still percent-encoded
    let Some(encoded) = url.password() else {
        return String::new();
    };
    let password = match percent_decode_str(encoded).decode_utf8() {
        Ok(password) => password,
        Err(err) => return format!("the proxy password is not valid UTF-8: {err}"),
    };

    if PROXY_PASSWORD_REGEX.is_match(&password) {
        return String::new();
    }
    "the proxy password contains characters that are not allowed \
     (space, apostrophe, backtick, comma, ampersand, equals, plus, percent and backslash are forbidden)"
        .into()
}

fn proxy<'a>(ctx: &'a ValidationContext, dk: &'a DynaKube) -> BoxFuture<'a, String> {
    async move {
        match proxy_url(dk, ctx.client.clone()).await {
            Ok(proxy) => check_proxy_url(&proxy),
            Err(err) => err.to_string(),
        }
    }
    .boxed()
}

pub fn validator() -> Validator {
    error("proxy", Check::Async(proxy))
}
