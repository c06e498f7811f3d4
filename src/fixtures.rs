//! Seeded sample operations, the stand-in for a real data source
use crate::operation::{CalendarDate, ClientLineItem, Money, Operation};
use crate::status::{OfferType, Status};

fn date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::new(year, month, day).expect("fixture dates are valid")
}

/// The registered-operations listing.
pub fn sample_operations() -> Vec<Operation> {
    vec![
        // no issuer on the first row, the listing must cope
        Operation::new("COE-2023-05-01")
            .set_kind("Autocall")
            .set_asset("IBOVESPA")
            .set_offer_type(OfferType::D0)
            .set_status(Status::Processed)
            .set_date(date(2023, 5, 1))
            .set_total_value(Money::from_centavos(125_000_000))
            .set_protection("95%"),
        Operation::new("COE-2023-04-28")
            .set_kind("Duplo Índice")
            .set_asset("S&P 500 / IBOVESPA")
            .set_issuer("Banco XYZ")
            .set_offer_type(OfferType::TwentyFourSeven)
            .set_status(Status::UnderReview)
            .set_date(date(2023, 4, 28))
            .set_total_value(Money::from_centavos(75_000_000))
            .set_protection("100%"),
        Operation::new("COE-2023-04-27")
            .set_kind("Autocall")
            .set_asset("NASDAQ")
            .set_issuer("Banco ABC")
            .set_offer_type(OfferType::Scheduled)
            .set_status(Status::Processed)
            .set_date(date(2023, 4, 27))
            .set_total_value(Money::from_centavos(50_000_000))
            .set_protection("90%"),
        Operation::new("COE-2023-04-25")
            .set_kind("Capital Protegido")
            .set_asset("IBOVESPA")
            .set_issuer("Banco DEF")
            .set_offer_type(OfferType::D0)
            .set_status(Status::Sent)
            .set_date(date(2023, 4, 25))
            .set_total_value(Money::from_centavos(100_000_000))
            .set_protection("100%"),
        Operation::new("COE-2023-04-20")
            .set_kind("Call Digital")
            .set_asset("Ouro")
            .set_issuer("Banco XYZ")
            .set_offer_type(OfferType::TwentyFourSeven)
            .set_status(Status::Rejected)
            .set_date(date(2023, 4, 20))
            .set_total_value(Money::from_centavos(35_000_000))
            .set_protection("95%"),
        Operation::new("COE-2023-04-15")
            .set_kind("Duplo Índice")
            .set_asset("EUR/USD / IBOVESPA")
            .set_issuer("Banco DEF")
            .set_offer_type(OfferType::Scheduled)
            .set_status(Status::Cancelled)
            .set_date(date(2023, 4, 15))
            .set_total_value(Money::from_centavos(150_000_000))
            .set_protection("98%"),
    ]
}

/// A fully detailed operation still in editing, with its client book.
pub fn operation_in_editing() -> Operation {
    Operation::new("COE-2023-05-01")
        .set_name("Autocall IBOVESPA Q2 2023")
        .set_kind("Autocall")
        .set_asset("IBOVESPA")
        .set_protection("95%")
        .set_issuer("Banco ABC")
        .set_offer_type(OfferType::Scheduled)
        .set_status(Status::Editing)
        .set_date(date(2023, 5, 1))
        .set_maturity_date(date(2025, 5, 1))
        .set_total_value(Money::from_centavos(125_000_000))
        .add_client(ClientLineItem::new(
            "Cliente A",
            "123.456.789-00",
            Money::from_centavos(50_000_000),
            Status::Editing,
        ))
        .add_client(ClientLineItem::new(
            "Cliente B",
            "987.654.321-00",
            Money::from_centavos(30_000_000),
            Status::Editing,
        ))
        .add_client(ClientLineItem::new(
            "Cliente C",
            "456.789.123-00",
            Money::from_centavos(20_000_000),
            Status::Editing,
        ))
        .add_client(ClientLineItem::new(
            "Cliente D",
            "789.123.456-00",
            Money::from_centavos(15_000_000),
            Status::Editing,
        ))
        .add_client(ClientLineItem::new(
            "Cliente E",
            "321.654.987-00",
            Money::from_centavos(10_000_000),
            Status::Editing,
        ))
}
