use std::collections::HashMap;

use thiserror::Error;

use super::builtin::BUILTIN_TEMPLATES;
use super::parser::{Segment, parse_pattern, placeholder_names};

/// Placeholder name -> value
pub type Bindings = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template não encontrado: {0}")]
    NotFound(String),

    #[error("Campos não fornecidos para '{template}': {}", .fields.join(", "))]
    MissingFields { template: String, fields: Vec<String> },
}

/// A named pattern with its placeholders resolved at construction
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    pattern: String,
    segments: Vec<Segment>,
    placeholders: Vec<String>,
}

impl Template {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let segments = parse_pattern(&pattern);
        let placeholders = placeholder_names(&segments);
        Self { name: name.into(), pattern, segments, placeholders }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw pattern including placeholder markers
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Declared placeholders in order of first appearance
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Placeholders with no binding, in declaration order
    pub fn missing(&self, bindings: &Bindings) -> Vec<String> {
        self.placeholders.iter().filter(|name| !bindings.contains_key(*name)).cloned().collect()
    }

    /// Substitute every placeholder, failing with all missing names at once
    pub fn render(&self, bindings: &Bindings) -> Result<String, TemplateError> {
        let missing = self.missing(bindings);
        if !missing.is_empty() {
            return Err(TemplateError::MissingFields {
                template: self.name.clone(),
                fields: missing,
            });
        }

        let mut output = String::with_capacity(self.pattern.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(name) => {
                    if let Some(value) = bindings.get(name) {
                        output.push_str(value);
                    }
                }
            }
        }

        Ok(output)
    }
}

/// Fixed set of templates, looked up by name
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    templates: Vec<Template>,
}

impl TemplateEngine {
    /// Engine holding the six built-in templates
    pub fn builtin() -> Self {
        Self::from_templates(
            BUILTIN_TEMPLATES.iter().map(|(name, pattern)| Template::new(*name, *pattern)).collect(),
        )
    }

    pub fn from_templates(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Template names in insertion order
    pub fn list(&self) -> Vec<&str> {
        self.templates.iter().map(Template::name).collect()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn preview(&self, name: &str) -> Option<&str> {
        self.get(name).map(Template::pattern)
    }

    pub fn placeholders(&self, name: &str) -> Option<&[String]> {
        self.get(name).map(Template::placeholders)
    }

    /// Fill a template by name
    ///
    /// # Errors
    ///
    /// - [`TemplateError::NotFound`] for an unknown name
    /// - [`TemplateError::MissingFields`] naming every placeholder without a binding
    pub fn fill(&self, name: &str, bindings: &Bindings) -> Result<String, TemplateError> {
        self.get(name).ok_or_else(|| TemplateError::NotFound(name.to_string()))?.render(bindings)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> Bindings {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_list_builtin_order() {
        let engine = TemplateEngine::builtin();
        assert_eq!(
            engine.list(),
            vec![
                "encaminhamento",
                "resolucao",
                "atualizacao",
                "aguardando",
                "verificacao",
                "contato_futuro"
            ]
        );
    }

    #[test]
    fn test_fill_forwarding() {
        let engine = TemplateEngine::builtin();
        let filled = engine
            .fill("encaminhamento", &bindings(&[("setor", "TI"), ("protocolo", "123")]))
            .unwrap();
        assert_eq!(filled, "Estou encaminhando seu caso para o setor TI. O protocolo é 123.");
    }

    #[test]
    fn test_fill_missing_one_field() {
        let engine = TemplateEngine::builtin();
        let err = engine.fill("encaminhamento", &bindings(&[("setor", "TI")])).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingFields {
                template: "encaminhamento".to_string(),
                fields: vec!["protocolo".to_string()],
            }
        );
    }

    #[test]
    fn test_fill_reports_every_missing_field() {
        let engine = TemplateEngine::builtin();
        let err = engine.fill("atualizacao", &bindings(&[("status", "em análise")])).unwrap_err();
        match err {
            TemplateError::MissingFields { fields, .. } => {
                assert_eq!(fields, vec!["caso", "previsao"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_message() {
        let err = TemplateError::MissingFields {
            template: "atualizacao".to_string(),
            fields: vec!["caso".to_string(), "previsao".to_string()],
        };
        assert_eq!(err.to_string(), "Campos não fornecidos para 'atualizacao': caso, previsao");
    }

    #[test]
    fn test_fill_unknown_template() {
        let engine = TemplateEngine::builtin();
        assert_eq!(
            engine.fill("inexistente", &Bindings::new()),
            Err(TemplateError::NotFound("inexistente".to_string()))
        );
    }

    #[test]
    fn test_fill_without_placeholders() {
        let engine = TemplateEngine::builtin();
        assert_eq!(
            engine.fill("aguardando", &Bindings::new()).unwrap(),
            "Aguardo as informações solicitadas para dar continuidade ao atendimento."
        );
    }

    #[test]
    fn test_extra_bindings_ignored() {
        let engine = TemplateEngine::builtin();
        let filled =
            engine.fill("verificacao", &bindings(&[("tempo", "15"), ("extra", "x")])).unwrap();
        assert_eq!(filled, "Vou verificar isso e retorno em 15 minutos com uma atualização.");
    }

    #[test]
    fn test_empty_value_is_a_binding() {
        let engine = TemplateEngine::builtin();
        let filled = engine.fill("resolucao", &bindings(&[("problema", "")])).unwrap();
        assert_eq!(filled, "Confirmo que o problema  foi resolvido. Precisa de mais alguma coisa?");
    }

    #[test]
    fn test_value_with_braces_not_reinterpreted() {
        let engine = TemplateEngine::builtin();
        let filled = engine.fill("resolucao", &bindings(&[("problema", "{caso}")])).unwrap();
        assert!(filled.contains("problema {caso} foi"));
    }

    #[test]
    fn test_repeated_placeholder_filled_everywhere() {
        let template = Template::new("eco", "{nome}, confirmo: {nome}.");
        assert_eq!(template.placeholders(), ["nome"]);
        assert_eq!(template.render(&bindings(&[("nome", "Ana")])).unwrap(), "Ana, confirmo: Ana.");
    }

    #[test]
    fn test_preview_returns_raw_pattern() {
        let engine = TemplateEngine::builtin();
        assert_eq!(
            engine.preview("verificacao"),
            Some("Vou verificar isso e retorno em {tempo} minutos com uma atualização.")
        );
        assert_eq!(engine.preview("nada"), None);
        assert_eq!(engine.placeholders("atualizacao").unwrap(), ["caso", "status", "previsao"]);
    }
}
