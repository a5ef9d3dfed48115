use bolsillo_core::{
    CategoryRecord, Currency, MemorySink, TransactionSink, TransactionType, load_categories_json,
};
use bolsillo_parser::{AccountTable, ParseContext, Parser, SegmentOutcome, format_command};
use chrono::NaiveDate;

fn ctx() -> ParseContext<'static> {
    ParseContext::default()
}

/// Compound command: only the first clause says "gasté"; the second still
/// resolves its own category.
#[test]
fn test_compound_expense_inherits_type() {
    let cmds = Parser::default().parse_multiple("gasté 10 en comida y 5 en taxi", &ctx());
    assert_eq!(cmds.len(), 2);
    for c in &cmds {
        assert_eq!(c.kind, TransactionType::Expense);
        assert_eq!(c.currency, Currency::Usd);
    }
    assert_eq!(cmds[0].category.as_deref(), Some("food"));
    assert_eq!(cmds[1].category.as_deref(), Some("transport"));
    assert_eq!(cmds[1].amount, 5.0);
}

#[test]
fn test_compound_accounts_detected_per_segment() {
    let cmds = Parser::default()
        .parse_multiple("20 de Banesco en comida y 30 de Mercantil en taxi", &ctx());
    let accounts: Vec<_> = cmds.iter().map(|c| c.account.as_deref()).collect();
    assert_eq!(accounts, vec![Some("banesco"), Some("mercantil")]);
    assert_eq!(cmds[0].category.as_deref(), Some("food"));
    assert_eq!(cmds[1].category.as_deref(), Some("transport"));
}

#[test]
fn test_breakfast_list() {
    let cmds = Parser::default().parse_multiple("desayuno 5, taxi 3, y café 2", &ctx());
    let amounts: Vec<f64> = cmds.iter().map(|c| c.amount).collect();
    assert_eq!(amounts, vec![5.0, 3.0, 2.0]);
    assert!(cmds.iter().all(|c| c.kind == TransactionType::Expense));
}

#[test]
fn test_venezuelan_amounts_in_compound_text() {
    let cmds = Parser::default()
        .parse_multiple("pagué 10.000 bolívares de luz y 2,50 dólares en pan", &ctx());
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0].amount, 10_000.0);
    assert_eq!(cmds[0].currency, Currency::Ves);
    assert_eq!(cmds[0].category.as_deref(), Some("services"));
    assert_eq!(cmds[1].amount, 2.5);
    assert_eq!(cmds[1].currency, Currency::Usd);
}

#[test]
fn test_registry_categories_from_json() {
    let categories = load_categories_json(r#"[{"id":"pets","name":"Mascotas"}]"#).unwrap();
    let ctx = ParseContext::default().with_categories(&categories);
    let cmd = Parser::default().parse("20 en mascotas", &ctx).unwrap();
    assert_eq!(cmd.category.as_deref(), Some("pets"));
}

#[test]
fn test_confidence_ordering() {
    let parser = Parser::default();
    let bare = parser.parse("gasté 40", &ctx()).unwrap();
    let category = parser.parse("gasté 40 en farmacia", &ctx()).unwrap();
    let both = parser.parse("gasté 40 en farmacia con zelle", &ctx()).unwrap();
    assert!(bare.confidence < category.confidence);
    assert!(category.confidence < both.confidence);
    assert!(both.confidence <= 1.0);
}

#[test]
fn test_settings_change_applies_to_later_parses() {
    let parser = Parser::default();
    assert_eq!(
        parser.parse("15 del banco plaza", &ctx()).unwrap().account,
        None
    );

    let mut table = AccountTable::default();
    table
        .upsert(bolsillo_parser::AccountEntry {
            name: "plaza".to_string(),
            keywords: vec!["banco plaza".to_string()],
        })
        .unwrap();
    parser.reconfigure_accounts(table);

    assert_eq!(
        parser.parse("15 del banco plaza", &ctx()).unwrap().account.as_deref(),
        Some("plaza")
    );
}

#[test]
fn test_unparsed_segments_are_reported() {
    let outcomes = Parser::default().parse_segments("hola y 5 en taxi", &ctx());
    assert!(matches!(&outcomes[0], SegmentOutcome::Unparsed { raw_text } if raw_text == "hola"));
    assert_eq!(outcomes[1].command().map(|c| c.amount), Some(5.0));
}

/// Parsed → confirmed (user edits the category) → handed to the sink.
#[test]
fn test_confirmation_flow_into_sink() {
    let parser = Parser::default();
    let date = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
    let mut sink = MemorySink::default();

    let cmds = parser.parse_multiple("recibí 300 usdt y 20 en mascotas", &ctx());
    assert_eq!(cmds.len(), 2);
    println!("{}", format_command(&cmds[0]));

    let pets = CategoryRecord::new("pets", "Mascotas").unwrap();
    for (i, mut cmd) in cmds.into_iter().enumerate() {
        if cmd.category.is_none() {
            cmd.category = Some(pets.id().to_string());
        }
        sink.submit(cmd.into_record(format!("tx-{i}"), date)).unwrap();
    }

    assert_eq!(sink.records.len(), 2);
    assert_eq!(sink.records[0].currency, Currency::Usdt);
    assert_eq!(sink.records[1].kind, TransactionType::Income);
    assert_eq!(sink.records[1].category.as_deref(), Some("pets"));
    assert_eq!(sink.records[1].description, "20 en mascotas");
}

/// Typed bolívar amounts: code glued to the number, comma cents after
/// thousands groups.
#[test]
fn test_typed_bolivar_amounts() {
    let parser = Parser::default();

    let cmd = parser.parse("20bs en comida", &ctx()).unwrap();
    assert_eq!(cmd.currency, Currency::Ves);
    assert_eq!(cmd.amount, 20.0);

    let cmds = parser.parse_multiple("10.000,50 bs de banesco y 7.5555 en taxi", &ctx());
    assert_eq!(cmds.len(), 2);
    assert_eq!(cmds[0].amount, 10_000.5);
    assert_eq!(cmds[0].account.as_deref(), Some("banesco"));
    assert_eq!(cmds[1].amount, 7.55);
    assert_eq!(cmds[1].currency, Currency::Ves);
}
