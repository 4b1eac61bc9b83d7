pub mod contract_pairs_route;
pub mod embed_contracts_route;
