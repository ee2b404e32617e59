//! Market data records
//!
//! Decoders for two common exchange message types. They serve as ready-to-use records and
//! show how records are composed from the primitives: the string fields are generic over the
//! materialization strategy, so each record exists in an owned variant (`String`, safe) and
//! a borrowed variant ([`RawStr`], zero-copy).

use crate::{json_object, scan::ScanValue, string::RawStr};

/// Aggregate trade event
///
/// ```json
/// {"a":5,"p":"1.0","q":"2.0","f":1,"l":2,"T":3,"m":true,"M":false}
/// ```
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct AggTrade<S> {
    /// `a`
    pub aggregate_trade_id: i64,
    /// `p`, the price as decimal string
    pub price: S,
    /// `q`, the quantity as decimal string
    pub quantity: S,
    /// `f`
    pub first_trade_id: i64,
    /// `l`
    pub last_trade_id: i64,
    /// `T`, in milliseconds since the Unix epoch
    pub trade_time: i64,
    /// `m`
    pub is_buyer_maker: bool,
    /// `M`
    pub is_best_match: bool,
}

json_object! {
    impl<'a, S: ScanValue<'a>> for AggTrade<S> {
        b"a" => aggregate_trade_id,
        b"p" => price,
        b"q" => quantity,
        b"f" => first_trade_id,
        b"l" => last_trade_id,
        b"T" => trade_time,
        b"m" => is_buyer_maker,
        b"M" => is_best_match,
    }
}

/// [`AggTrade`] with owned, validated strings
pub type OwnedAggTrade = AggTrade<String>;
/// [`AggTrade`] with strings borrowed from the input
pub type BorrowedAggTrade<'a> = AggTrade<RawStr<'a>>;

/// Price and quantity of one order book level
pub type Level = [f64; 2];

/// Payload of an [`Orderbook`] message
#[derive(Clone, Default, PartialEq, Debug)]
pub struct OrderbookData<S> {
    /// `time`, in seconds since the Unix epoch
    pub time: f64,
    /// `checksum` of the book after applying this message
    pub checksum: i64,
    /// `bids`
    pub bids: Vec<Level>,
    /// `asks`
    pub asks: Vec<Level>,
    /// `action`, for example `partial` or `update`
    pub action: S,
}

json_object! {
    impl<'a, S: ScanValue<'a>> for OrderbookData<S> {
        b"time" => time,
        b"checksum" => checksum,
        b"bids" => bids,
        b"asks" => asks,
        b"action" => action,
    }
}

/// Order book snapshot or update message
///
/// ```json
/// {"channel":"orderbook","market":"X","type":"update","data":{"time":1.0,"checksum":2,
///  "bids":[[1.0,2.0]],"asks":[],"action":"update"}}
/// ```
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Orderbook<S> {
    /// `channel`
    pub channel: S,
    /// `market`
    pub market: S,
    /// `type`
    pub kind: S,
    /// `data`
    pub data: OrderbookData<S>,
}

json_object! {
    impl<'a, S: ScanValue<'a>> for Orderbook<S> {
        b"channel" => channel,
        b"market" => market,
        b"type" => kind,
        b"data" => data,
    }
}

/// [`Orderbook`] with owned, validated strings
pub type OwnedOrderbook = Orderbook<String>;
/// [`Orderbook`] with strings borrowed from the input
pub type BorrowedOrderbook<'a> = Orderbook<RawStr<'a>>;
