pub mod test_utils;
mod values_tests;
