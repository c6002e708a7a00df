use super::repository::Model;
use contracts::domain::a004_transaction::aggregate::{
    EntryDirection, Transaction, TransactionKind,
};
use contracts::domain::a008_payable::aggregate::Payable;
use contracts::domain::a009_receivable::aggregate::Receivable;
use contracts::domain::a010_card_invoice::aggregate::{CardInvoice, CardInvoiceLine};
use contracts::domain::a011_manual_entry::aggregate::ManualEntry;
use contracts::domain::common::{classify_regime, MovementKind, MovementOrigin};
use uuid::Uuid;

use crate::shared::ingest::ofx::OfxTransaction;

/// O regime de TODO movimento nasce aqui, de classify_regime - nenhum outro
/// caminho grava o campo. É isto que garante que caixa e competência
/// particionam o conjunto sem sobreposição.
fn new_entry(
    company_ref: &str,
    origin: MovementOrigin,
    kind: MovementKind,
    date: chrono::NaiveDate,
    direction: EntryDirection,
    description: &str,
    amount: f64,
    external_ref: String,
    registrator: String,
) -> Model {
    Model {
        id: Uuid::new_v4().to_string(),
        company_ref: company_ref.to_string(),
        movement_date: date.to_string(),
        direction: direction.as_str().to_string(),
        origin: origin.as_str().to_string(),
        description: description.to_string(),
        amount,
        external_ref,
        category_ref: None,
        category_name: None,
        cost_center_ref: None,
        responsible_ref: None,
        regime: classify_regime(origin, kind).as_str().to_string(),
        registrator,
        created_at: None,
        updated_at: None,
    }
}

fn movement_kind(kind: TransactionKind) -> MovementKind {
    match kind {
        // repasse é o único evento de caixa do marketplace; venda, tarifa e
        // devolução são fatos econômicos (competência)
        TransactionKind::Payout => MovementKind::Payout,
        _ => MovementKind::Sale,
    }
}

/// Movimento derivado de uma transação de canal conciliada
pub fn from_transaction(transaction: &Transaction, registrator: &str) -> Model {
    let kind = movement_kind(transaction.kind);
    let date = match transaction.kind {
        TransactionKind::Payout => transaction
            .state
            .settlement_date
            .unwrap_or(transaction.state.transaction_date),
        _ => transaction.state.transaction_date,
    };
    let amount = match transaction.kind {
        TransactionKind::Payout => transaction
            .amounts
            .net_amount
            .unwrap_or(transaction.amounts.gross_amount),
        _ => transaction.amounts.gross_amount,
    };

    let mut entry = new_entry(
        &transaction.header.company_ref,
        MovementOrigin::Marketplace,
        kind,
        date,
        transaction.direction,
        &transaction.base.description,
        amount,
        registrator.to_string(),
        registrator.to_string(),
    );
    entry.category_ref = transaction.state.category_ref.clone();
    entry.cost_center_ref = transaction.state.cost_center_ref.clone();
    entry
}

/// Movimento de caixa de um lançamento de extrato bancário (chave = FITID)
pub fn from_bank_statement(company_ref: &str, ofx: &OfxTransaction) -> Model {
    let direction = if ofx.is_credit() {
        EntryDirection::Credit
    } else {
        EntryDirection::Debit
    };
    new_entry(
        company_ref,
        MovementOrigin::Bank,
        MovementKind::Settlement,
        ofx.date,
        direction,
        &ofx.description,
        ofx.amount.abs(),
        ofx.fitid.clone(),
        format!("ofx:{}", ofx.fitid),
    )
}

/// Movimento de caixa da liquidação de uma conta a pagar
pub fn from_payable(payable: &Payable, registrator: &str) -> Model {
    let date = payable.paid_date.unwrap_or(payable.due_date);
    let mut entry = new_entry(
        &payable.company_ref,
        MovementOrigin::Payable,
        MovementKind::Settlement,
        date,
        EntryDirection::Debit,
        &payable.base.description,
        payable.amount,
        registrator.to_string(),
        registrator.to_string(),
    );
    entry.category_ref = payable.category_ref.clone();
    entry.cost_center_ref = payable.cost_center_ref.clone();
    entry
}

/// Movimento de caixa da liquidação de uma conta a receber
pub fn from_receivable(receivable: &Receivable, registrator: &str) -> Model {
    let date = receivable.received_date.unwrap_or(receivable.due_date);
    let mut entry = new_entry(
        &receivable.company_ref,
        MovementOrigin::Receivable,
        MovementKind::Settlement,
        date,
        EntryDirection::Credit,
        &receivable.base.description,
        receivable.amount,
        registrator.to_string(),
        registrator.to_string(),
    );
    entry.category_ref = receivable.category_ref.clone();
    entry.cost_center_ref = receivable.cost_center_ref.clone();
    entry
}

/// Movimento de competência de uma linha da fatura de cartão, atribuído ao
/// período em que a despesa foi incorrida
pub fn from_card_invoice_line(invoice: &CardInvoice, line: &CardInvoiceLine) -> Model {
    let invoice_id = invoice.base.id.value().to_string();
    let mut entry = new_entry(
        &invoice.company_ref,
        MovementOrigin::Card,
        MovementKind::CardExpense,
        line.date,
        EntryDirection::Debit,
        &line.description,
        line.amount,
        format!("{}:{}", invoice_id, line.line_id),
        invoice_id,
    );
    entry.category_ref = line.category_ref.clone();
    entry
}

/// Movimento de caixa do pagamento da fatura (total único)
pub fn from_card_invoice_payment(invoice: &CardInvoice) -> Model {
    let invoice_id = invoice.base.id.value().to_string();
    let date = invoice.paid_date.unwrap_or(invoice.due_date);
    new_entry(
        &invoice.company_ref,
        MovementOrigin::Card,
        MovementKind::CardInvoicePayment,
        date,
        EntryDirection::Debit,
        &format!("Pagamento fatura {}", invoice.card_name),
        invoice.total(),
        format!("{}:payment", invoice_id),
        invoice_id,
    )
}

/// Movimento de caixa de um lançamento manual
pub fn from_manual_entry(entry: &ManualEntry, registrator: &str) -> Model {
    let mut movement = new_entry(
        &entry.company_ref,
        MovementOrigin::Manual,
        MovementKind::Settlement,
        entry.entry_date,
        entry.direction,
        &entry.base.description,
        entry.amount,
        registrator.to_string(),
        registrator.to_string(),
    );
    movement.category_ref = entry.category_ref.clone();
    movement.cost_center_ref = entry.cost_center_ref.clone();
    movement
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a004_transaction::aggregate::{
        FeeBreakdown, ReconciliationStatus, SalesChannel, TransactionAmounts, TransactionHeader,
        TransactionSourceMeta, TransactionState,
    };

    fn transaction(kind: TransactionKind) -> Transaction {
        Transaction::new_for_insert(
            "TRX-1".into(),
            "Venda PED-1".into(),
            TransactionHeader {
                company_ref: "c1".into(),
                channel: SalesChannel::MercadoLivre,
                external_ref: Some("PED-1".into()),
                order_id: None,
                account_label: None,
                shipment_type: None,
            },
            kind,
            EntryDirection::Credit,
            TransactionAmounts {
                gross_amount: 100.0,
                net_amount: Some(85.0),
                fees: FeeBreakdown::default(),
            },
            TransactionState {
                status: ReconciliationStatus::Reconciled,
                transaction_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                settlement_date: Some(NaiveDate::from_ymd_opt(2024, 3, 29).unwrap()),
                category_ref: None,
                cost_center_ref: None,
            },
            vec![],
            TransactionSourceMeta {
                raw_payload_ref: None,
                imported_at: chrono::Utc::now(),
            },
        )
    }

    #[test]
    fn test_sale_is_accrual_on_transaction_date() {
        let entry = from_transaction(&transaction(TransactionKind::Sale), "reg-1");
        assert_eq!(entry.regime, "competencia");
        assert_eq!(entry.movement_date, "2024-03-15");
        assert_eq!(entry.amount, 100.0);
    }

    #[test]
    fn test_payout_is_cash_on_settlement_date_with_net_amount() {
        let entry = from_transaction(&transaction(TransactionKind::Payout), "reg-1");
        assert_eq!(entry.regime, "caixa");
        assert_eq!(entry.movement_date, "2024-03-29");
        assert_eq!(entry.amount, 85.0);
    }

    #[test]
    fn test_bank_statement_direction_follows_sign() {
        let credit = OfxTransaction {
            fitid: "f1".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            amount: 100.0,
            description: "TED".into(),
        };
        let debit = OfxTransaction {
            fitid: "f2".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
            amount: -50.0,
            description: "PIX".into(),
        };
        let credit_entry = from_bank_statement("c1", &credit);
        let debit_entry = from_bank_statement("c1", &debit);
        assert_eq!(credit_entry.direction, "credit");
        assert_eq!(debit_entry.direction, "debit");
        assert_eq!(debit_entry.amount, 50.0);
        assert_eq!(credit_entry.regime, "caixa");
        assert_eq!(credit_entry.external_ref, "f1");
    }

    #[test]
    fn test_card_line_is_accrual_payment_is_cash() {
        let invoice = CardInvoice::new_for_insert(
            "FAT-1".into(),
            "Fatura Nubank".into(),
            "c1".into(),
            "Nubank".into(),
            3,
            2024,
            NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            vec![CardInvoiceLine {
                line_id: "1".into(),
                date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
                description: "Embalagens".into(),
                amount: 150.0,
                category_ref: None,
                installment: None,
            }],
        );
        let line_entry = from_card_invoice_line(&invoice, &invoice.lines[0]);
        assert_eq!(line_entry.regime, "competencia");
        assert_eq!(line_entry.movement_date, "2024-03-02");

        let payment_entry = from_card_invoice_payment(&invoice);
        assert_eq!(payment_entry.regime, "caixa");
        assert_eq!(payment_entry.amount, 150.0);
    }

    #[test]
    fn test_manual_entry_is_cash() {
        let entry = ManualEntry::new_for_insert(
            "LM-1".into(),
            "Pró-labore".into(),
            "c1".into(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            EntryDirection::Debit,
            5000.0,
        );
        let movement = from_manual_entry(&entry, "reg-1");
        assert_eq!(movement.regime, "caixa");
        assert_eq!(movement.direction, "debit");
    }
}
