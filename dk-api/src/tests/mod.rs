mod conversion_test;

use rstest::*;

use super::*;
