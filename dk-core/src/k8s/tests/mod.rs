mod owners_test;

use dk_testutils::*;
use rstest::*;

use super::*;
use crate::macros::*;
