use crate::models::{QuickResponse, ResponseMap};

/// Built-in responses used when no response document exists yet
const DEFAULT_RESPONSES: &[(&str, &str, &str)] = &[
    ("saudacao", "Olá! Em que posso ajudar?", "inicio"),
    ("agradecimento", "Obrigado pelo contato! Fico feliz em ajudar.", "inicio"),
    (
        "problema_rede",
        "Vou verificar a conectividade de rede do seu setor. Enquanto isso, pode tentar reiniciar o roteador?",
        "rede",
    ),
    (
        "senha_bloqueada",
        "Posso ajudar com o desbloqueio de senha. Precisa que eu reset sua senha agora?",
        "acesso",
    ),
    (
        "lentidao",
        "Entendo que está com lentidão. Vou verificar nossos sistemas. Pode me informar qual aplicação está lenta?",
        "performance",
    ),
    (
        "follow_up",
        "Vou acompanhar este caso e retorno em 30 minutos com atualizações.",
        "acompanhamento",
    ),
];

/// Fresh copy of the built-in response set
pub fn default_responses() -> ResponseMap {
    DEFAULT_RESPONSES
        .iter()
        .map(|(code, message, category)| (code.to_string(), QuickResponse::new(*message, *category)))
        .collect()
}
