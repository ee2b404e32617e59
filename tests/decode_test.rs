use std::{collections::HashMap, fmt::Debug, thread};

use fieldscan::{
    decode, decode_with_settings, from_slice, json_object,
    records::{
        AggTrade, BorrowedAggTrade, BorrowedOrderbook, OrderbookData, OwnedAggTrade,
        OwnedOrderbook,
    },
    DecodeError, DecodeSettings, ErrorKind, Expected, QuotedF64, RawStr, ScanValue,
};
use serde::Deserialize;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const AGG_TRADE_JSON: &str = r#"{"a":5,"p":"1.0","q":"2.0","f":1,"l":2,"T":3,"m":true,"M":false}"#;
const ORDERBOOK_JSON: &str = r#"{"channel":"orderbook","market":"X","type":"update","data":{"time":1.0,"checksum":2,"bids":[[1.0,2.0]],"asks":[],"action":"update"}}"#;

/// Same structure as [`AggTrade`], decoded with Serde JSON for comparison
#[derive(Deserialize, Debug)]
struct SerdeAggTrade {
    a: i64,
    p: String,
    q: String,
    f: i64,
    l: i64,
    #[serde(rename = "T")]
    t: i64,
    m: bool,
    #[serde(rename = "M")]
    m2: bool,
}

impl From<SerdeAggTrade> for OwnedAggTrade {
    fn from(t: SerdeAggTrade) -> Self {
        AggTrade {
            aggregate_trade_id: t.a,
            price: t.p,
            quantity: t.q,
            first_trade_id: t.f,
            last_trade_id: t.l,
            trade_time: t.t,
            is_buyer_maker: t.m,
            is_best_match: t.m2,
        }
    }
}

fn decode_error<'a, T: ScanValue<'a> + Default + Debug>(json: &'a str) -> DecodeError {
    match from_slice::<T>(json.as_bytes()) {
        Err(e) => e,
        Ok(value) => panic!("Should have failed for '{json}', but got {value:?}"),
    }
}

#[test]
fn agg_trade_scenario() -> TestResult {
    let trade: OwnedAggTrade = from_slice(AGG_TRADE_JSON.as_bytes())?;
    assert_eq!(5, trade.aggregate_trade_id);
    assert_eq!("1.0", trade.price);
    assert_eq!("2.0", trade.quantity);
    assert_eq!(1, trade.first_trade_id);
    assert_eq!(2, trade.last_trade_id);
    assert_eq!(3, trade.trade_time);
    assert_eq!(true, trade.is_buyer_maker);
    assert_eq!(false, trade.is_best_match);

    let serde_trade: SerdeAggTrade = serde_json::from_str(AGG_TRADE_JSON)?;
    assert_eq!(OwnedAggTrade::from(serde_trade), trade);
    Ok(())
}

#[test]
fn orderbook_scenario() -> TestResult {
    let book: OwnedOrderbook = from_slice(ORDERBOOK_JSON.as_bytes())?;
    assert_eq!("orderbook", book.channel);
    assert_eq!("X", book.market);
    assert_eq!("update", book.kind);
    assert_eq!(
        OrderbookData {
            time: 1.0,
            checksum: 2,
            bids: vec![[1.0, 2.0]],
            asks: Vec::new(),
            action: "update".to_owned(),
        },
        book.data
    );

    let borrowed: BorrowedOrderbook<'_> = from_slice(ORDERBOOK_JSON.as_bytes())?;
    assert_eq!(borrowed.kind, "update");
    assert_eq!(book.data.bids, borrowed.data.bids);
    Ok(())
}

#[test]
fn unknown_members_are_ignored() -> TestResult {
    let with_unknown = r#"{"x":1,"e":"aggTrade","a":5,"p":"1.0","q":"2.0","f":1,"l":2,"T":3,"m":true,"M":false,"nested":{"deep":[[[{"a":99}]]],"s":"}]\""},"last":null}"#;
    let expected: OwnedAggTrade = from_slice(AGG_TRADE_JSON.as_bytes())?;
    assert_eq!(expected, from_slice::<OwnedAggTrade>(with_unknown.as_bytes())?);

    let serde_trade: SerdeAggTrade = serde_json::from_str(with_unknown)?;
    assert_eq!(expected, OwnedAggTrade::from(serde_trade));
    Ok(())
}

#[test]
fn safe_and_raw_strings() -> TestResult {
    let json = r#"{"p":"12.5","q":"ab\"c"}"#;
    let owned: OwnedAggTrade = from_slice(json.as_bytes())?;
    let borrowed: BorrowedAggTrade<'_> = from_slice(json.as_bytes())?;

    // Without escape sequences both are identical
    assert_eq!(borrowed.price, owned.price.as_str());
    // Raw strings keep escape sequences
    assert_eq!("ab\"c", owned.quantity);
    assert_eq!(br#"ab\"c"#, borrowed.quantity.as_bytes());
    assert_eq!(owned.quantity, borrowed.quantity.unescape()?);
    Ok(())
}

#[test]
fn raw_strings_are_not_validated() -> TestResult {
    let json = b"{\"p\":\"\xFF\xFE\"}";
    let borrowed: BorrowedAggTrade<'_> = from_slice(json)?;
    assert_eq!(b"\xFF\xFE", borrowed.price.as_bytes());
    assert!(borrowed.price.to_str().is_err());

    let error = match from_slice::<OwnedAggTrade>(json) {
        Err(e) => e,
        Ok(v) => panic!("should have failed, but got {v:?}"),
    };
    assert_eq!(ErrorKind::InvalidUtf8, error.kind);
    assert_eq!(6, error.offset);
    Ok(())
}

#[test]
fn reset_on_failure() {
    let mut trade = OwnedAggTrade::default();
    let result = decode(
        br#"{"a":5,"p":"1.0","q":"2.0","f":1,"l":"invalid"}"#,
        &mut trade,
    );
    match result {
        Err(e) => {
            assert_eq!(ErrorKind::ExpectedInteger, e.kind);
            assert_eq!(37, e.offset);
        }
        Ok(()) => panic!("should have failed"),
    }
    assert_eq!(OwnedAggTrade::default(), trade);
}

#[test]
fn reuse_after_failure() -> TestResult {
    let mut trade = OwnedAggTrade::default();
    decode(AGG_TRADE_JSON.as_bytes(), &mut trade)?;
    assert!(decode(br#"{"a":1,"p":"#, &mut trade).is_err());
    assert_eq!(OwnedAggTrade::default(), trade);

    decode(br#"{"q":"3"}"#, &mut trade)?;
    assert_eq!(
        AggTrade {
            quantity: "3".to_owned(),
            ..Default::default()
        },
        trade
    );
    Ok(())
}

#[test]
fn errors() {
    let error = decode_error::<OwnedAggTrade>(r#"{"a":9223372036854775808}"#);
    assert_eq!(ErrorKind::IntegerTooLarge, error.kind);
    assert_eq!(23, error.offset);

    let error = decode_error::<OwnedAggTrade>(r#"{"a":-9223372036854775809}"#);
    assert_eq!(ErrorKind::IntegerTooSmall, error.kind);

    let error = decode_error::<OwnedAggTrade>(r#"{"m":yes}"#);
    assert_eq!(ErrorKind::ExpectedBool, error.kind);
    assert_eq!(5, error.offset);
    assert_eq!(r#"{"m":>>>yes}"#, error.context);
    assert_eq!(
        r#"expected bool at offset 5: {"m":>>>yes}"#,
        error.to_string()
    );

    let error = decode_error::<OwnedAggTrade>(r#"{"a":1"#);
    assert_eq!(ErrorKind::UnexpectedEndOfInput(Expected::Member), error.kind);

    let error = decode_error::<OwnedAggTrade>(r#"{"a":1 "p":"2"}"#);
    assert_eq!(ErrorKind::SyntaxError, error.kind);
    assert_eq!(7, error.offset);

    let error = decode_error::<OwnedOrderbook>(r#"{"data":{"bids":[[1.0]]}}"#);
    assert_eq!(ErrorKind::ExpectedByte(b','), error.kind);

    // Only the decimal prefix is a number
    let error = decode_error::<OwnedOrderbook>(r#"{"data":{"time":0x10}}"#);
    assert_eq!(ErrorKind::SyntaxError, error.kind);
    assert_eq!(17, error.offset);

    let error = decode_error::<OwnedAggTrade>(r#"{"x":[nope],"a":1}"#);
    assert_eq!(ErrorKind::SyntaxError, error.kind);
    assert_eq!(5, error.offset);

    let error = decode_error::<OwnedAggTrade>("");
    assert_eq!(ErrorKind::UnexpectedEndOfInput(Expected::Byte(b'{')), error.kind);
    assert_eq!(
        "unexpected end of input, expected '{' at offset 0: >>>",
        error.to_string()
    );
}

#[test]
fn nesting_limit_of_unknown_members() -> TestResult {
    let nested = |depth: usize| {
        format!(
            r#"{{"x":{}{},"a":1}}"#,
            "[".repeat(depth),
            "]".repeat(depth)
        )
    };

    assert_eq!(1, from_slice::<OwnedAggTrade>(nested(100).as_bytes())?.aggregate_trade_id);
    let json = nested(101);
    let error = decode_error::<OwnedAggTrade>(&json);
    assert_eq!(ErrorKind::NestingTooDeep, error.kind);
    assert_eq!(5 + 100, error.offset);

    let settings = DecodeSettings {
        max_nesting_depth: 10,
        ..Default::default()
    };
    let mut trade = OwnedAggTrade::default();
    decode_with_settings(nested(10).as_bytes(), &mut trade, settings.clone())?;
    let result = decode_with_settings(nested(11).as_bytes(), &mut trade, settings);
    assert_eq!(
        Some(ErrorKind::NestingTooDeep),
        result.err().map(|e| e.kind)
    );
    Ok(())
}

#[test]
fn lenient_skipping() -> TestResult {
    let json = br#"{"x":[nope],"a":1}"#;
    let settings = DecodeSettings {
        validate_skipped_values: false,
        ..Default::default()
    };
    let mut trade = OwnedAggTrade::default();
    decode_with_settings(json, &mut trade, settings)?;
    assert_eq!(1, trade.aggregate_trade_id);
    Ok(())
}

#[derive(Default, Debug, PartialEq)]
struct Quote<'a> {
    symbol: RawStr<'a>,
    bid: QuotedF64,
    sizes: (u32, i32, f32),
    attributes: HashMap<String, bool>,
}

json_object! {
    impl<'a> for Quote<'a> {
        b"s" => symbol,
        b"b" => bid,
        b"z" => sizes,
        b"attr" => attributes,
        _ => deny
    }
}

#[test]
fn custom_record() -> TestResult {
    let json = br#"{"s":"AB","b":"1.5","z":[1,-2,0.5],"attr":{"halted":false,"odd\tlot":true}}"#;
    let quote: Quote<'_> = from_slice(json)?;
    assert_eq!(quote.symbol, "AB");
    assert_eq!(QuotedF64(1.5), quote.bid);
    assert_eq!((1, -2, 0.5), quote.sizes);
    assert_eq!(Some(&true), quote.attributes.get("odd\tlot"));
    assert_eq!(2, quote.attributes.len());

    let error = decode_error::<Quote<'_>>(r#"{"s":"AB","t":1}"#);
    assert_eq!(ErrorKind::UnexpectedMember, error.kind);
    assert_eq!(10, error.offset);
    Ok(())
}

#[test]
fn shared_buffer_across_threads() {
    let lines: Vec<String> = (0..64)
        .map(|i| {
            format!(
                r#"{{"a":{i},"p":"{i}.5","q":"1","f":{i},"l":{},"T":{},"m":true,"M":false}}"#,
                i + 1,
                i * 1000
            )
        })
        .collect();

    thread::scope(|scope| {
        for chunk in lines.chunks(16) {
            scope.spawn(move || {
                let mut trade: BorrowedAggTrade<'_> = Default::default();
                for line in chunk {
                    if let Err(e) = decode(line.as_bytes(), &mut trade) {
                        panic!("failed decoding '{line}': {e}");
                    }
                    assert_eq!(trade.first_trade_id + 1, trade.last_trade_id);
                    assert_eq!(
                        format!("{}.5", trade.aggregate_trade_id),
                        trade.price.to_string()
                    );
                }
            });
        }
    });
}
