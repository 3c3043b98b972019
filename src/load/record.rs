// Wire records as exported by the backend, before validation

use serde::Deserialize;

/// Backend ids arrive as either strings or integers
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl RecordId {
    pub fn into_string(self) -> String {
        match self {
            RecordId::Text(s) => s,
            RecordId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    pub id: RecordId,
    #[serde(alias = "prazo")]
    pub deadline: String,
    #[serde(default, alias = "prazoProrrogado", alias = "prazo_prorrogado")]
    pub extended_deadline: Option<String>,
    #[serde(default, alias = "dataConclusao", alias = "data_conclusao")]
    pub completed_at: Option<String>,
    pub status: String,
    #[serde(alias = "dataCriacao", alias = "created_at")]
    pub created_at: String,
    #[serde(default, alias = "unidade")]
    pub unit: Option<String>,
    #[serde(default, alias = "descricao")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseRecord {
    pub id: RecordId,
    #[serde(default, alias = "numero")]
    pub number: Option<String>,
    #[serde(default, alias = "assunto")]
    pub subject: Option<String>,
    #[serde(default, alias = "andamentos")]
    pub stages: Vec<StageRecord>,
}
