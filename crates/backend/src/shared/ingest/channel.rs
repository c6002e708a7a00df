use contracts::domain::a004_transaction::aggregate::SalesChannel;

/// Tabela de prefixos/substrings de nome de loja → canal interno. Avaliada
/// em ordem; o primeiro que casar vence, o resto cai em `outro`.
const CHANNEL_PATTERNS: &[(&str, SalesChannel)] = &[
    ("mercado", SalesChannel::MercadoLivre),
    ("meli", SalesChannel::MercadoLivre),
    ("ml ", SalesChannel::MercadoLivre),
    ("shopee", SalesChannel::Shopee),
    ("amazon", SalesChannel::Amazon),
    ("amzn", SalesChannel::Amazon),
    ("magalu", SalesChannel::Magalu),
    ("magazine luiza", SalesChannel::Magalu),
];

/// Detecta o canal a partir do nome da loja/conta informado no relatório
pub fn detect_channel(store_name: &str) -> SalesChannel {
    let normalized = store_name.trim().to_lowercase();
    for (pattern, channel) in CHANNEL_PATTERNS {
        if normalized.starts_with(pattern) || normalized.contains(pattern) {
            return *channel;
        }
    }
    SalesChannel::Outro
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_substring() {
        assert_eq!(detect_channel("Mercado Livre"), SalesChannel::MercadoLivre);
        assert_eq!(detect_channel("mercadolivre BR"), SalesChannel::MercadoLivre);
        assert_eq!(detect_channel("Loja Shopee SP"), SalesChannel::Shopee);
        assert_eq!(detect_channel("AMAZON.COM.BR"), SalesChannel::Amazon);
        assert_eq!(detect_channel("Magazine Luiza"), SalesChannel::Magalu);
    }

    #[test]
    fn test_unknown_falls_back_to_outro() {
        assert_eq!(detect_channel("Loja Própria"), SalesChannel::Outro);
        assert_eq!(detect_channel(""), SalesChannel::Outro);
    }
}
