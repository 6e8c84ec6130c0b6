mod file_body_tests;
mod headers_tests;
mod json_body_tests;
mod route_order_tests;
mod url_matching_tests;
