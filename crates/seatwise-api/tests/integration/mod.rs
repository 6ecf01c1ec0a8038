mod data_routes;
mod design_stream;
mod local_advice;
mod model_reports;
mod search_routes;
mod streaming;
