mod error_mapping;
