use chrono::NaiveDate;

/// Converte um valor monetário em formato brasileiro para f64.
///
/// Remove "R$", espaços e separadores de milhar ("."), converte a vírgula
/// decimal em ponto. Entrada malformada vira 0.0 - nunca falha, porque uma
/// célula ruim não pode derrubar o lote.
///
/// # Exemplos
/// ```
/// use backend::shared::format::parse_brl;
/// assert_eq!(parse_brl("R$ 1.234,56"), 1234.56);
/// assert_eq!(parse_brl("-"), 0.0);
/// ```
pub fn parse_brl(raw: &str) -> f64 {
    let cleaned: String = raw
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return 0.0;
    }

    let normalized = if cleaned.contains(',') {
        // formato brasileiro: ponto é milhar, vírgula é decimal
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<f64>().unwrap_or(0.0)
}

/// Converte uma data em formatos flexíveis: DD/MM/AAAA, AAAA-MM-DD,
/// DD-MM-AAAA, DD.MM.AAAA e variantes com ano de 2 dígitos (assumido 20xx).
pub fn parse_date_flexible(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // descarta componente de hora ("15/03/2024 10:30")
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);

    // ISO primeiro: AAAA-MM-DD
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some(date);
    }

    for sep in ['/', '-', '.'] {
        let parts: Vec<&str> = date_part.split(sep).collect();
        if parts.len() != 3 {
            continue;
        }
        let day: u32 = match parts[0].parse() {
            Ok(d) => d,
            Err(_) => continue,
        };
        let month: u32 = match parts[1].parse() {
            Ok(m) => m,
            Err(_) => continue,
        };
        let year_raw: i32 = match parts[2].parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        // ano de 2 dígitos: relatórios de canal são sempre 20xx
        let year = if year_raw < 100 { 2000 + year_raw } else { year_raw };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    None
}

/// Data plausível para detecção de período: ano 2000–2100, mês 1–12.
/// Datas fora da faixa são descartadas da amostragem, sem abortar a
/// ingestão.
pub fn is_plausible_period_date(date: &NaiveDate) -> bool {
    use chrono::Datelike;
    (2000..=2100).contains(&date.year())
}

/// Formata um valor em reais: 1234.56 → "R$ 1.234,56"
pub fn format_brl(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let integer = cents / 100;
    let fraction = cents % 100;

    let mut grouped = String::new();
    let digits = integer.to_string();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, fraction)
}

/// Formata uma data no padrão brasileiro: dd/MM/aaaa
pub fn format_date_br(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_brl_brazilian_format() {
        assert_eq!(parse_brl("R$ 1.234,56"), 1234.56);
        assert_eq!(parse_brl("1.234,56"), 1234.56);
        assert_eq!(parse_brl("12,30"), 12.30);
        assert_eq!(parse_brl("R$ 0,99"), 0.99);
    }

    #[test]
    fn test_parse_brl_plain_decimal() {
        assert_eq!(parse_brl("1234.56"), 1234.56);
        assert_eq!(parse_brl("42"), 42.0);
        assert_eq!(parse_brl("-15,90"), -15.90);
    }

    #[test]
    fn test_parse_brl_malformed_never_throws() {
        assert_eq!(parse_brl("-"), 0.0);
        assert_eq!(parse_brl(""), 0.0);
        assert_eq!(parse_brl("abc"), 0.0);
        assert_eq!(parse_brl("R$"), 0.0);
    }

    #[test]
    fn test_parse_date_flexible_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date_flexible("15/03/2024"), Some(expected));
        assert_eq!(parse_date_flexible("2024-03-15"), Some(expected));
        assert_eq!(parse_date_flexible("15-03-2024"), Some(expected));
        assert_eq!(parse_date_flexible("15.03.2024"), Some(expected));
        assert_eq!(parse_date_flexible("15/03/24"), Some(expected));
    }

    #[test]
    fn test_parse_date_with_time_component() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date_flexible("15/03/2024 10:30"), Some(expected));
    }

    #[test]
    fn test_parse_date_invalid() {
        assert_eq!(parse_date_flexible(""), None);
        assert_eq!(parse_date_flexible("32/13/2024"), None);
        assert_eq!(parse_date_flexible("não é data"), None);
    }

    #[test]
    fn test_plausible_period_date() {
        assert!(is_plausible_period_date(
            &NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        ));
        assert!(!is_plausible_period_date(
            &NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()
        ));
        assert!(!is_plausible_period_date(
            &NaiveDate::from_ymd_opt(2101, 1, 1).unwrap()
        ));
    }

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1234567.89), "R$ 1.234.567,89");
        assert_eq!(format_brl(-42.5), "-R$ 42,50");
    }

    #[test]
    fn test_format_date_br() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(format_date_br(&date), "15/03/2024");
    }
}
