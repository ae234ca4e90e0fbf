mod attribute_tests;
mod document_tests;
mod scanner_tests;
