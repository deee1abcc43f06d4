mod feature_flags_test;
mod proxy_test;

use dk_api::latest::*;
use dk_testutils::*;
use rstest::*;

use super::*;
use crate::macros::*;
