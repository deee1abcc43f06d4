pub use std::backtrace::Backtrace;

pub use anyhow::{
    anyhow,
    bail,
    ensure,
};
pub use paste::paste;
pub use regex::{
    Regex,
    RegexBuilder,
};
pub use thiserror::Error;

pub type EmptyResult = anyhow::Result<()>;

const BUILD_DIR: &str = "/.build/";
const CARGO_REGISTRY_DIR: &str = "/.cargo/registry/";
const RUSTC_DIR: &str = "/rustc/";
const GLIBC: &str = "glibc";

// Creates an enum deriving thiserror::Error, plus a snake_case constructor for each variant that
// returns an anyhow::Error, e.g. `DynaKubeError::invalid_tenant_url("foo")`
#[macro_export]
macro_rules! err_impl {
    (@hidden $errtype:ident, $item:ident, String) => {
        paste! {
            pub fn [<$item:snake>](in_: &str) -> anyhow::Error {
                anyhow!{$errtype::$item(in_.into())}
            }
        }
    };

    (@hidden $errtype:ident, $item:ident, $($dtype:tt)::+) => {
        paste! {
            pub fn [<$item:snake>](in_: &$($dtype)::+) -> anyhow::Error {
                anyhow!{$errtype::$item(in_.clone())}
            }
        }
    };

    ($errtype:ident,
        $(#[$errinfo:meta] $item:ident($($dtype:tt)::+),)+
    ) => {
        #[derive(Debug, Error)]
        pub enum $errtype {
            $(#[$errinfo] $item($($dtype)::+)),+
        }

        impl $errtype {
            $(err_impl! {@hidden $errtype, $item, $($dtype)::+})+
        }
    };
}

// Drops the frames of a captured backtrace that belong to the standard library, tokio, rocket or
// any other registry crate, collapsing each run of dropped frames into a single marker line
pub fn prune_backtrace(bt: &str) -> String {
    let Ok(re) = RegexBuilder::new(r"^\s+\d+(?s:.*?)(\s+at\s+.*:\d+)$").multi_line(true).build() else {
        return bt.into();
    };

    let mut pruned = String::new();
    let mut skipped = 0;
    for frame in re.find_iter(bt).map(|m| m.as_str()) {
        if [BUILD_DIR, CARGO_REGISTRY_DIR, RUSTC_DIR, GLIBC].iter().any(|d| frame.contains(d)) {
            skipped += 1;
            continue;
        }

        push_skipped_marker(&mut pruned, skipped);
        skipped = 0;
        pruned += frame;
        pruned += "\n";
    }
    push_skipped_marker(&mut pruned, skipped);

    pruned
}

fn push_skipped_marker(out: &mut String, skipped: usize) {
    match skipped {
        0 => (),
        1 => *out += "      -- <skipped 1 frame> --\n",
        n => *out += &format!("      -- <skipped {n} frames> --\n"),
    }
}

// Logs an anyhow::Error at error level along with the part of its backtrace that points into
// this workspace
#[macro_export]
macro_rules! dkerr {
    ($err:ident, $msg:literal $(, $args:expr)*) => {
        let bt = $crate::errors::prune_backtrace(&$err.backtrace().to_string());
        error!(concat!($msg, "\n\n{}\n\nPartial Stack Trace:\n\n{}\n\n") $(, $args)*, $err, bt);
    };
}

pub use {
    dkerr,
    err_impl,
};
