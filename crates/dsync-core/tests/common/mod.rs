pub mod dataset_server;
pub mod zip_fixture;
