use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Concept {
    pub term: &'static str,
    pub description: &'static str,
}

/// Short explanations shown next to the dashboard inputs.
pub const CONCEPTS: [Concept; 4] = [
    Concept {
        term: "Selic",
        description: "Taxa básica da economia. Define o rendimento da poupança e do Tesouro Selic.",
    },
    Concept {
        term: "LCI/LCA",
        description: "Crédito para os setores imobiliário e agro. Isenta de Imposto de Renda; costuma render um percentual menor do CDI, mas pode ganhar no líquido.",
    },
    Concept {
        term: "CDB",
        description: "Empréstimo ao banco. Paga Imposto de Renda pela tabela regressiva, mas costuma oferecer taxas brutas maiores.",
    },
    Concept {
        term: "CDI",
        description: "Taxa dos empréstimos entre bancos. É a referência para LCI e CDB.",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct ConceptsResponse {
    pub concepts: Vec<Concept>,
}

impl Default for ConceptsResponse {
    fn default() -> Self {
        Self {
            concepts: CONCEPTS.to_vec(),
        }
    }
}
