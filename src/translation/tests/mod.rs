mod adapter_tests;
mod comparison_tests;
