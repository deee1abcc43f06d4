use std::fmt;

use dk_core::prelude::*;
use futures::future::BoxFuture;

use super::ValidationContext;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValidatorType {
    Error,
    Warning,
}

impl fmt::Display for ValidatorType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ValidatorType::Error => 'E',
                ValidatorType::Warning => 'W',
            }
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ValidatorCode(pub ValidatorType, pub usize);

impl fmt::Display for ValidatorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{:04}", self.0, self.1)
    }
}

// A rule returns the empty string when the DynaKube passes, and a human-readable message otherwise.
// `Each` rules report one message per offending item instead.
pub type SyncCheck = fn(&ValidationContext, &DynaKube) -> String;
pub type AsyncCheck = for<'a> fn(&'a ValidationContext, &'a DynaKube) -> BoxFuture<'a, String>;
pub type EachCheck = fn(&ValidationContext, &DynaKube) -> Vec<String>;

pub enum Check {
    Sync(SyncCheck),
    Async(AsyncCheck),
    Each(EachCheck),
}

pub struct Validator {
    pub type_: ValidatorType,
    pub name: &'static str,
    pub check: Check,
}

impl Validator {
    pub async fn run(&self, ctx: &ValidationContext, dk: &DynaKube) -> Vec<String> {
        let msg = match self.check {
            Check::Sync(f) => f(ctx, dk),
            Check::Async(f) => f(ctx, dk).await,
            Check::Each(f) => return f(ctx, dk),
        };
        if msg.is_empty() { vec![] } else { vec![msg] }
    }
}

pub fn error(name: &'static str, check: Check) -> Validator {
    Validator { type_: ValidatorType::Error, name, check }
}

pub fn warning(name: &'static str, check: Check) -> Validator {
    Validator { type_: ValidatorType::Warning, name, check }
}
