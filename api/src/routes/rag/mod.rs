pub mod document_route;
pub mod rag_request;
pub mod search_route;
pub mod stats_route;
