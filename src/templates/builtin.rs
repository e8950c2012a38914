/// Built-in templates, in menu order
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("encaminhamento", "Estou encaminhando seu caso para o setor {setor}. O protocolo é {protocolo}."),
    ("resolucao", "Confirmo que o problema {problema} foi resolvido. Precisa de mais alguma coisa?"),
    ("atualizacao", "Atualização do caso {caso}: {status}. Previsão: {previsao}."),
    ("aguardando", "Aguardo as informações solicitadas para dar continuidade ao atendimento."),
    ("verificacao", "Vou verificar isso e retorno em {tempo} minutos com uma atualização."),
    (
        "contato_futuro",
        "Vou entrar em contato novamente {periodo} para verificar se está tudo funcionando.",
    ),
];

/// Prompt labels for the placeholders used by the built-in templates
const FIELD_LABELS: &[(&str, &str)] = &[
    ("setor", "Setor para encaminhamento"),
    ("protocolo", "Número do protocolo"),
    ("problema", "Problema resolvido"),
    ("caso", "Número do caso"),
    ("status", "Status atual"),
    ("previsao", "Previsão"),
    ("tempo", "Tempo para retorno (minutos)"),
    ("periodo", "Período (ex: 'amanhã', 'na segunda-feira')"),
];

/// Human prompt for a placeholder, or the placeholder name itself
pub fn field_label(placeholder: &str) -> &str {
    FIELD_LABELS
        .iter()
        .find(|(name, _)| *name == placeholder)
        .map(|(_, label)| *label)
        .unwrap_or(placeholder)
}
