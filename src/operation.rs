//! Core operation entity and its value types
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::error::ParseError;
use crate::status::{OfferType, Status};

/// Monetary amount in centavos. Use integers for currency.
#[derive(
    minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord,
)]
#[cbor(array)]
pub struct Money(#[n(0)] i64);

impl Money {
    pub const fn from_centavos(centavos: i64) -> Self {
        Self(centavos)
    }

    pub const fn centavos(self) -> i64 {
        self.0
    }

    /// Reduces a display string such as `"R$ 1.250.000,00"` to an amount.
    ///
    /// Everything except digits, comma and minus is stripped, the first
    /// comma becomes the decimal point and anything after a second comma is
    /// discarded, which mirrors how the legacy tables were parsed.
    pub fn parse_brl(text: &str) -> Result<Self, ParseError> {
        let mut reduced: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '-')
            .collect();

        if let Some(first) = reduced.find(',') {
            reduced.replace_range(first..=first, ".");
            if let Some(second) = reduced.find(',') {
                reduced.truncate(second);
            }
        }

        let amount: f64 = reduced
            .parse()
            .map_err(|_| ParseError::Money(text.to_string()))?;
        if !amount.is_finite() {
            return Err(ParseError::Money(text.to_string()));
        }

        Ok(Self((amount * 100.0).round() as i64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let digits = (abs / 100).to_string();
        let mut whole = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                whole.push('.');
            }
            whole.push(ch);
        }
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}R$ {whole},{:02}", abs % 100)
    }
}

/// Calendar date without a time component (trade, maturity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the display forms carried by the legacy tables: `DD-MM-YYYY`,
    /// `DD/MM/YYYY` and ISO `YYYY-MM-DD`.
    pub fn parse_display(text: &str) -> Result<Self, ParseError> {
        let normalized = text.trim().replace('/', "-");
        let parts: Vec<&str> = normalized.split('-').collect();
        if parts.len() != 3 {
            return Err(ParseError::Date(text.to_string()));
        }

        let numbers: Vec<u32> = parts
            .iter()
            .map(|p| p.parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseError::Date(text.to_string()))?;

        // a four-digit leading field means the string is already in ISO order
        let (year, month, day) = if parts[0].len() == 4 {
            (numbers[0], numbers[1], numbers[2])
        } else {
            (numbers[2], numbers[1], numbers[0])
        };

        Self::new(year as i32, month, day).ok_or_else(|| ParseError::Date(text.to_string()))
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%d/%m/%Y"))
    }
}

impl<C> minicbor::Encode<C> for CalendarDate {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.i32(self.0.num_days_from_ce())?.ok()
    }
}

impl<'b, C> minicbor::Decode<'b, C> for CalendarDate {
    fn decode(d: &mut minicbor::Decoder<'b>, _: &mut C) -> Result<Self, minicbor::decode::Error> {
        let days = d.i32()?;

        NaiveDate::from_num_days_from_ce_opt(days)
            .map(CalendarDate)
            .ok_or(minicbor::decode::Error::message(
                "failed to convert day count to a calendar date",
            ))
    }
}

/// Instant an event happened, UTC.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct Timestamp<T: TimeZone>(DateTime<T>);

impl Timestamp<Utc> {
    pub fn now() -> Self {
        Self(Utc::now())
    }
    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<T: TimeZone> From<DateTime<T>> for Timestamp<T> {
    fn from(value: DateTime<T>) -> Self {
        Timestamp(value)
    }
}

impl<C> minicbor::Encode<C> for Timestamp<Utc> {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        if let Some(nsec) = self.0.timestamp_nanos_opt() {
            return e.i64(nsec)?.ok();
        }

        Err(minicbor::encode::Error::message(
            "failed to encode timestamp. timestamp_nanos_opt returned None",
        ))
    }
}

impl<'b, C> minicbor::Decode<'b, C> for Timestamp<Utc> {
    fn decode(d: &mut minicbor::Decoder<'b>, _: &mut C) -> Result<Self, minicbor::decode::Error> {
        let nsecs = d.i64()?;

        Ok(Timestamp(DateTime::from_timestamp_nanos(nsecs)))
    }
}

/// One client allocation inside an operation. Line items keep insertion
/// order and their status always mirrors the parent operation after a
/// lifecycle transition.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct ClientLineItem {
    #[n(0)]
    pub name: String,
    #[n(1)]
    pub document: String,
    #[n(2)]
    pub value: Money,
    #[n(3)]
    pub status: Status,
}

impl ClientLineItem {
    pub fn new(name: &str, document: &str, value: Money, status: Status) -> Self {
        Self {
            name: name.to_string(),
            document: document.to_string(),
            value,
            status,
        }
    }
}

/// Free-text metadata attached to an operation. `commercial_conditions` is
/// mandatory before the operation can be sent.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionalFields {
    #[n(0)]
    pub observations: String,
    #[n(1)]
    pub commercial_conditions: String,
    #[n(2)]
    pub legal_notes: String,
}

impl AdditionalFields {
    pub fn with_commercial_conditions(conditions: &str) -> Self {
        Self {
            commercial_conditions: conditions.to_string(),
            ..Self::default()
        }
    }
}

/// A COE structured operation. The key into the registry is `id`.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    #[n(0)]
    pub id: String,
    #[n(1)]
    pub name: Option<String>,
    #[n(2)]
    pub kind: String,
    #[n(3)]
    pub asset: String,
    #[n(4)]
    pub protection: String,
    #[n(5)]
    pub issuer: Option<String>,
    #[n(6)]
    pub offer_type: OfferType,
    #[n(7)]
    pub status: Status,
    #[n(8)]
    pub date: Option<CalendarDate>,
    #[n(9)]
    pub maturity_date: Option<CalendarDate>,
    #[n(10)]
    pub total_value: Option<Money>,
    #[n(11)]
    pub clients: Vec<ClientLineItem>,
    #[n(12)]
    pub additional_fields: AdditionalFields,
}

impl Operation {
    /// Construct a fresh operation in the initial `Editing` status. The
    /// remaining fields are filled through the setter chain.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            kind: String::new(),
            asset: String::new(),
            protection: String::new(),
            issuer: None,
            offer_type: OfferType::D0,
            status: Status::Editing,
            date: None,
            maturity_date: None,
            total_value: None,
            clients: Vec::new(),
            additional_fields: AdditionalFields::default(),
        }
    }
    pub fn set_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
    pub fn set_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }
    pub fn set_asset(mut self, asset: &str) -> Self {
        self.asset = asset.to_string();
        self
    }
    pub fn set_protection(mut self, protection: &str) -> Self {
        self.protection = protection.to_string();
        self
    }
    pub fn set_issuer(mut self, issuer: &str) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }
    pub fn set_offer_type(mut self, offer_type: OfferType) -> Self {
        self.offer_type = offer_type;
        self
    }
    pub fn set_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
    pub fn set_date(mut self, date: CalendarDate) -> Self {
        self.date = Some(date);
        self
    }
    pub fn set_maturity_date(mut self, date: CalendarDate) -> Self {
        self.maturity_date = Some(date);
        self
    }
    pub fn set_total_value(mut self, value: Money) -> Self {
        self.total_value = Some(value);
        self
    }
    pub fn add_client(mut self, client: ClientLineItem) -> Self {
        self.clients.push(client);
        self
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_brl_display_strings() {
        assert_eq!(
            Money::parse_brl("R$ 1.250.000,00").unwrap(),
            Money::from_centavos(125_000_000)
        );
        assert_eq!(
            Money::parse_brl("R$ 750.000,50").unwrap(),
            Money::from_centavos(75_000_050)
        );
        assert_eq!(
            Money::parse_brl("-R$ 10,25").unwrap(),
            Money::from_centavos(-1_025)
        );
        assert!(Money::parse_brl("R$ ---").is_err());
        assert!(Money::parse_brl("").is_err());
    }

    #[test]
    fn formats_brl_with_grouping() {
        assert_eq!(
            Money::from_centavos(125_000_000).to_string(),
            "R$ 1.250.000,00"
        );
        assert_eq!(Money::from_centavos(35_000_000).to_string(), "R$ 350.000,00");
        assert_eq!(Money::from_centavos(-1_025).to_string(), "-R$ 10,25");
        assert_eq!(Money::from_centavos(5).to_string(), "R$ 0,05");
    }

    #[test]
    fn money_display_roundtrips_through_parse() {
        for centavos in [0i64, 5, 100, 99_999, 125_000_000, -75_000_050] {
            let money = Money::from_centavos(centavos);
            assert_eq!(Money::parse_brl(&money.to_string()).unwrap(), money);
        }
    }

    #[test]
    fn parses_display_dates_in_either_order() {
        let date = CalendarDate::new(2023, 5, 1).unwrap();
        assert_eq!(CalendarDate::parse_display("01-05-2023").unwrap(), date);
        assert_eq!(CalendarDate::parse_display("01/05/2023").unwrap(), date);
        assert_eq!(CalendarDate::parse_display("2023-05-01").unwrap(), date);
        assert!(CalendarDate::parse_display("2023-13-01").is_err());
        assert!(CalendarDate::parse_display("soon").is_err());
    }

    #[test]
    fn calendar_date_cbor_roundtrip() {
        let original = CalendarDate::new(2024, 2, 29).unwrap();

        let encoding = minicbor::to_vec(original).unwrap();
        let decode: CalendarDate = minicbor::decode(&encoding).unwrap();

        assert_eq!(original, decode);
    }

    #[test]
    fn timestamp_cbor_roundtrip() {
        let original = Timestamp::now();

        let encoding = minicbor::to_vec(original.clone()).unwrap();
        let decode: Timestamp<Utc> = minicbor::decode(&encoding).unwrap();

        assert_eq!(original, decode);
    }

    #[test]
    fn operation_builder_sets_fields() {
        let operation = Operation::new("COE-2023-05-01")
            .set_name("Autocall IBOVESPA Q2 2023")
            .set_kind("Autocall")
            .set_asset("IBOVESPA")
            .set_protection("95%")
            .set_issuer("Banco ABC")
            .set_total_value(Money::from_centavos(125_000_000))
            .add_client(ClientLineItem::new(
                "Cliente A",
                "123.456.789-00",
                Money::from_centavos(50_000_000),
                Status::Editing,
            ));

        assert_eq!(operation.status, Status::Editing);
        assert_eq!(operation.client_count(), 1);
        assert_eq!(operation.issuer.as_deref(), Some("Banco ABC"));
    }
}
