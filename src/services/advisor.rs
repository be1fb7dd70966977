//! Prompt building and model calls for the written recommendations

use std::sync::Arc;

use super::llm::{LanguageModel, LlmError};
use super::opportunity::TreasuryOpportunity;
use super::projection::ProjectionRow;
use super::text_table::render_table;
use crate::models::simulation::InvestorProfile;

/// Shown in place of the analysis when the model cannot be reached.
pub const ANALYSIS_UNAVAILABLE: &str = "IA Indisponível no momento.";

/// Escape `$` so markdown renderers don't read it as a math delimiter.
pub fn sanitize_for_markdown(text: &str) -> String {
    text.replace('$', "\\$")
}

pub fn projection_table(rows: &[ProjectionRow]) -> String {
    let mut headers = vec!["Prazo (Anos)".to_string()];
    if let Some(first) = rows.first() {
        headers.extend(first.products.iter().map(|p| p.label.clone()));
    }

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.year.to_string()];
            cells.extend(row.products.iter().map(|p| format!("{:.2}", p.net_value)));
            cells
        })
        .collect();

    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    render_table(&header_refs, &body)
}

pub fn opportunity_table(opportunities: &[TreasuryOpportunity]) -> String {
    let body: Vec<Vec<String>> = opportunities
        .iter()
        .map(|o| {
            vec![
                o.title.clone(),
                o.maturity.clone(),
                format!("{}%", o.site_rate),
                format!("{:.2}% ({})", o.considered_rate, o.basis.description()),
                format!("R$ {:.2}", o.final_value),
            ]
        })
        .collect();

    render_table(
        &["Título", "Vencimento", "Taxa Site", "Rentabilidade Considerada", "Valor Final Aprox."],
        &body,
    )
}

pub fn build_profile_prompt(table: &str, profile: InvestorProfile) -> String {
    format!(
        "Você é um consultor financeiro sênior.\n\
         Analise a projeção abaixo, com valores líquidos de impostos e taxas:\n\
         {table}\n\n\
         Perfil do cliente: {label} ({context})\n\n\
         Tarefas:\n\
         1. Compare LCI e CDB numericamente.\n\
         2. Recomende a alocação mais adequada para esse perfil.\n\n\
         Formatação obrigatória:\n\
         - Não use notação matemática nem LaTeX.\n\
         - Não use o símbolo de cifrão; escreva \"reais\" ou \"R$ \" com espaço.\n\
         - Organize a resposta em tópicos.\n",
        table = table,
        label = profile.label(),
        context = profile.context(),
    )
}

pub fn build_treasury_report_prompt(table: &str, principal: f64, years: u32, benchmark_rate: f64) -> String {
    format!(
        "Você é o consultor financeiro pessoal de um investidor conservador.\n\
         Objetivo: aplicar R$ {principal:.2} e resgatar em exatamente {years} anos.\n\n\
         Títulos do Tesouro disponíveis hoje:\n\
         {table}\n\n\
         Como analisar:\n\
         1. Compare o vencimento de cada título com o prazo de {years} anos do investidor.\n\
         2. Se sugerir um IPCA+ com vencimento muito posterior ao prazo, alerte sobre o risco \
         de marcação a mercado na venda antecipada.\n\
         3. A rentabilidade do Tesouro Selic já inclui a Selic de {benchmark_rate:.2}%; \
         trate-o como a opção mais segura para prazos curtos.\n\n\
         Responda apenas com o corpo de um e-mail curto e direto, terminando com uma \
         recomendação clara.\n",
    )
}

pub fn build_consultant_prompt(table: &str, benchmark_rate: f64, principal: f64, years: u32) -> String {
    format!(
        "Você é um consultor sênior de renda fixa no Brasil. O cliente é conservador e \
         prioriza a proteção do patrimônio.\n\n\
         Taxas coletadas hoje no Tesouro Direto:\n\
         ---\n\
         {table}\n\
         ---\n\n\
         Regras de análise:\n\
         1. A taxa do Tesouro Selic na tabela é só o adicional sobre a Selic, que hoje está \
         em {benchmark_rate:.2}%. Some as duas para avaliar o retorno total.\n\
         2. Taxas reais de IPCA+ acima de 6% são historicamente excelentes.\n\
         3. O cliente quer aplicar R$ {principal:.2} por {years} anos.\n\n\
         Escreva um e-mail curto (no máximo 3 parágrafos) dizendo qual é a melhor \
         oportunidade da lista e por que ela supera as demais, em tom profissional e \
         encorajador.\n",
    )
}

#[derive(Clone)]
pub struct Advisor {
    model: Arc<dyn LanguageModel>,
}

impl Advisor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Dashboard analysis. Never fails: model errors yield [`ANALYSIS_UNAVAILABLE`].
    pub async fn analyze_projection(&self, rows: &[ProjectionRow], profile: InvestorProfile) -> String {
        let prompt = build_profile_prompt(&projection_table(rows), profile);

        match self.model.generate(&prompt).await {
            Ok(reply) => sanitize_for_markdown(&reply),
            Err(e) => {
                tracing::warn!("Model unavailable for projection analysis: {}", e);
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }

    pub async fn treasury_report(
        &self,
        opportunities: &[TreasuryOpportunity],
        principal: f64,
        years: u32,
        benchmark_rate: f64,
    ) -> Result<String, LlmError> {
        let prompt = build_treasury_report_prompt(
            &opportunity_table(opportunities),
            principal,
            years,
            benchmark_rate,
        );
        self.model.generate(&prompt).await
    }

    pub async fn consult(
        &self,
        table: &str,
        benchmark_rate: f64,
        principal: f64,
        years: u32,
    ) -> Result<String, LlmError> {
        let prompt = build_consultant_prompt(table, benchmark_rate, principal, years);
        self.model.generate(&prompt).await
    }
}
