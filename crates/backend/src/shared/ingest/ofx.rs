use super::error::IngestError;
use chrono::NaiveDate;

/// Lançamento de extrato bancário extraído de um arquivo OFX
#[derive(Debug, Clone, PartialEq)]
pub struct OfxTransaction {
    /// FITID - identificador único do lançamento no banco (chave de upsert)
    pub fitid: String,
    /// Data do lançamento
    pub date: NaiveDate,
    /// Valor com sinal: positivo = crédito, negativo = débito
    pub amount: f64,
    /// Descrição (MEMO, com NAME como reserva)
    pub description: String,
}

impl OfxTransaction {
    pub fn is_credit(&self) -> bool {
        self.amount >= 0.0
    }
}

/// Parser de extrato OFX (SGML, tags sem fechamento). Percorre os blocos
/// <STMTTRN> e extrai FITID, DTPOSTED, TRNAMT e MEMO/NAME. Lançamentos sem
/// FITID ou sem data válida são pulados - problema de linha, não de
/// arquivo.
pub fn parse_ofx(content: &str) -> Result<Vec<OfxTransaction>, IngestError> {
    if !content.to_uppercase().contains("<OFX") {
        return Err(IngestError::Validation(
            "arquivo não contém um bloco <OFX>".into(),
        ));
    }

    let mut transactions = Vec::new();
    // to_ascii_uppercase preserva os offsets de byte do conteúdo original
    let upper = content.to_ascii_uppercase();
    let mut cursor = 0;

    while let Some(start_rel) = upper[cursor..].find("<STMTTRN>") {
        let start = cursor + start_rel + "<STMTTRN>".len();
        let end = upper[start..]
            .find("</STMTTRN>")
            .map(|e| start + e)
            .unwrap_or(content.len());

        let block = &content[start..end];
        if let Some(transaction) = parse_stmttrn_block(block) {
            transactions.push(transaction);
        }

        cursor = end;
    }

    Ok(transactions)
}

fn parse_stmttrn_block(block: &str) -> Option<OfxTransaction> {
    let fitid = tag_value(block, "FITID")?;
    let date = parse_ofx_date(&tag_value(block, "DTPOSTED")?)?;
    let amount = parse_ofx_amount(&tag_value(block, "TRNAMT")?)?;
    let description = tag_value(block, "MEMO")
        .or_else(|| tag_value(block, "NAME"))
        .unwrap_or_default();

    Some(OfxTransaction {
        fitid,
        date,
        amount,
        description,
    })
}

/// Valor de uma tag SGML: do fim de <TAG> até a próxima tag ou fim de linha
fn tag_value(block: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let start = block.to_ascii_uppercase().find(&open)? + open.len();
    let rest = &block[start..];
    let end = rest.find('<').unwrap_or_else(|| {
        rest.find('\n').unwrap_or(rest.len())
    });
    let value = rest[..end].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Datas OFX: AAAAMMDD[HHMMSS][.XXX][fuso como "[-3:BRT]"] - o sufixo de
/// fuso é descartado, só os 8 primeiros dígitos importam
fn parse_ofx_date(raw: &str) -> Option<NaiveDate> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() < 8 {
        return None;
    }
    let year: i32 = digits[0..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_ofx_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
OFXHEADER:100
DATA:OFXSGML

<OFX>
<BANKMSGSRSV1>
<STMTTRNRS>
<STMTRS>
<BANKTRANLIST>
<STMTTRN>
<TRNTYPE>CREDIT
<DTPOSTED>20240315103000[-3:BRT]
<TRNAMT>1500.00
<FITID>2024031501
<MEMO>TED RECEBIDA MARKETPLACE
</STMTTRN>
<STMTTRN>
<TRNTYPE>DEBIT
<DTPOSTED>20240316
<TRNAMT>-230.50
<FITID>2024031602
<NAME>PAGAMENTO FORNECEDOR
</STMTTRN>
</BANKTRANLIST>
</STMTRS>
</STMTTRNRS>
</BANKMSGSRSV1>
</OFX>
"#;

    #[test]
    fn test_parse_ofx_sample() {
        let transactions = parse_ofx(SAMPLE).unwrap();
        assert_eq!(transactions.len(), 2);

        let first = &transactions[0];
        assert_eq!(first.fitid, "2024031501");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(first.amount, 1500.00);
        assert!(first.is_credit());
        assert_eq!(first.description, "TED RECEBIDA MARKETPLACE");

        let second = &transactions[1];
        assert_eq!(second.date, NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
        assert_eq!(second.amount, -230.50);
        assert!(!second.is_credit());
        assert_eq!(second.description, "PAGAMENTO FORNECEDOR");
    }

    #[test]
    fn test_timezone_suffix_discarded() {
        assert_eq!(
            parse_ofx_date("20240315103000[-3:BRT]"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(
            parse_ofx_date("20240315"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_not_an_ofx_file() {
        assert!(parse_ofx("data,valor\n15/03/2024,10").is_err());
    }

    #[test]
    fn test_transaction_without_fitid_is_skipped() {
        let content = r#"
<OFX>
<STMTTRN>
<DTPOSTED>20240315
<TRNAMT>10.00
<MEMO>SEM FITID
</STMTTRN>
</OFX>
"#;
        let transactions = parse_ofx(content).unwrap();
        assert!(transactions.is_empty());
    }
}
