use gestion_stock::{
    amount::MAX_UNITS,
    speller::{render_hundreds, spell_integer},
    spell, spell_f64, AmountError, AmountSpeller, MonetaryAmount,
};
use insta::assert_snapshot;
use regex::Regex;

fn amount(raw: &str) -> MonetaryAmount {
    raw.parse().expect("valid amount")
}

fn integer_words(raw: &str) -> String {
    spell(amount(raw)).integer_words().to_string()
}

#[test]
fn zero_collapses_for_both_parts() {
    assert_eq!(
        spell(amount("0.00")).as_str(),
        "*** zéro Da et zéro centimes."
    );
}

#[test]
fn one_unit() {
    assert_eq!(spell(amount("1.00")).as_str(), "*** un Da et zéro centimes.");
}

#[test]
fn reference_integer_parts() {
    assert_eq!(integer_words("21.00"), "vingt et un");
    assert_eq!(integer_words("71.00"), "soixante et onze");
    assert_eq!(integer_words("80.00"), "quatre-vingt");
    assert_eq!(integer_words("81.00"), "quatre-vingt-un");
    assert_eq!(integer_words("100.00"), "cent");
    assert_eq!(integer_words("200.00"), "deux cents");
    assert_eq!(integer_words("1000.00"), "mille");
    assert_eq!(integer_words("2000.00"), "deux mille");
}

#[test]
fn spells_all_scale_groups() {
    let spelled = spell_f64(1_234_567_891.23).unwrap();
    assert_eq!(
        spelled.integer_words(),
        "un milliard deux cent trente-quatre millions cinq cent soixante-sept mille \
         huit cent quatre-vingt-onze"
    );
    assert_eq!(spelled.cents_words(), "vingt-trois");
}

#[test]
fn reference_table() {
    let inputs = [
        "0", "1", "21", "71", "80", "81", "100", "200", "1000", "2000", "0.01", "12.5",
        "99.99", "1000000", "2000000000", "1234567891.23",
    ];
    let table = inputs
        .iter()
        .map(|raw| format!("{} => {}", raw, spell(amount(raw))))
        .collect::<Vec<_>>()
        .join("\n");
    assert_snapshot!(table, @r###"
    0 => *** zéro Da et zéro centimes.
    1 => *** un Da et zéro centimes.
    21 => *** vingt et un Da et zéro centimes.
    71 => *** soixante et onze Da et zéro centimes.
    80 => *** quatre-vingt Da et zéro centimes.
    81 => *** quatre-vingt-un Da et zéro centimes.
    100 => *** cent Da et zéro centimes.
    200 => *** deux cents Da et zéro centimes.
    1000 => *** mille Da et zéro centimes.
    2000 => *** deux mille Da et zéro centimes.
    0.01 => *** zéro Da et un centimes.
    12.5 => *** douze Da et cinquante centimes.
    99.99 => *** quatre-vingt-dix-neuf Da et quatre-vingt-dix-neuf centimes.
    1000000 => *** un million Da et zéro centimes.
    2000000000 => *** deux milliards Da et zéro centimes.
    1234567891.23 => *** un milliard deux cent trente-quatre millions cinq cent soixante-sept mille huit cent quatre-vingt-onze Da et vingt-trois centimes.
    "###);
}

#[test]
fn spelling_is_deterministic() {
    let speller = AmountSpeller::new();
    let value = amount("987654.32");
    let first = speller.spell(value);
    let second = speller.spell(value);
    assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());
}

#[test]
fn every_group_renders_cleanly() {
    for n in 0..=999u16 {
        let text = render_hundreds(n);
        assert_eq!(text.is_empty(), n == 0, "{n}");
        assert!(!text.contains("  "), "{n}: {text:?}");
        assert!(!text.starts_with('-') && !text.ends_with('-'), "{n}: {text:?}");
    }
}

#[test]
fn whole_amounts_end_with_zero_cents() {
    let shape = Regex::new(r"^\*\*\* [a-zé -]+ Da et zéro centimes\.$").unwrap();
    let mut n = 0u64;
    while n <= MAX_UNITS {
        let spelled = spell(MonetaryAmount::from_parts(n, 0).unwrap());
        assert!(spelled.as_str().ends_with("Da et zéro centimes."), "{n}");
        assert!(shape.is_match(spelled.as_str()), "{n}: {spelled}");
        assert!(!spelled.as_str().contains("  "), "{n}: {spelled}");
        n += 7_919_191;
    }
    let top = spell(MonetaryAmount::from_parts(MAX_UNITS, 0).unwrap());
    assert!(top.as_str().ends_with("Da et zéro centimes."));
}

#[test]
fn invalid_amounts_are_rejected() {
    assert!(matches!(spell_f64(-0.5), Err(AmountError::Negative(_))));
    assert_eq!(spell_f64(f64::NAN), Err(AmountError::NonFinite));
    assert!(matches!(
        spell_f64(1e12),
        Err(AmountError::OutOfRange(_))
    ));
    assert!(matches!(
        spell_integer(1_000_000_000_000),
        Err(AmountError::OutOfRange(_))
    ));
    assert!(matches!(
        AmountSpeller::new().spell_str("abc"),
        Err(AmountError::Unparsable(_))
    ));
}

#[test]
fn extra_fraction_digits_are_rounded() {
    assert_eq!(
        AmountSpeller::new().spell_str("10.005").unwrap().cents_words(),
        "un"
    );
    assert_eq!(
        AmountSpeller::new().spell_str("10.999").unwrap().integer_words(),
        "onze"
    );
}
