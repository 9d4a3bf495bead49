//! Field names of a PNCP search item consumed downstream.

/// Contract signing date.
pub const SIGNING_DATE: &str = "data_assinatura";
/// Issuing body (órgão) name.
pub const BODY_NAME: &str = "orgao_nome";
/// Municipality name.
pub const MUNICIPALITY_NAME: &str = "municipio_nome";
/// State code.
pub const UF: &str = "uf";
/// Bidding modality (modalidade de licitação) name.
pub const MODALITY_NAME: &str = "modalidade_licitacao_nome";
/// Global contract value.
pub const GLOBAL_VALUE: &str = "valor_global";
/// Free-text description.
pub const DESCRIPTION: &str = "description";

/// Derived: year of the signing date.
pub const YEAR: &str = "ano";
/// Derived: global value divided by one million.
pub const GLOBAL_VALUE_MILLIONS: &str = "valor_global_por_milhao";
