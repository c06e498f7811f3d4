//! Reference data catalog: issuers, assets, protections, terms, instruments
//! and operation templates
//!
//! Configuration tables edited on the parameters and template screens.
//! Held in memory; rows are deactivated rather than deleted so existing
//! operations keep their references.
use crate::operation::CalendarDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issuer {
    pub id: u32,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Index,
    Fx,
    Commodity,
}

impl AssetKind {
    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Index => "Índice",
            AssetKind::Fx => "Câmbio",
            AssetKind::Commodity => "Commodity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: u32,
    pub name: String,
    pub kind: AssetKind,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionType {
    pub id: u32,
    pub name: String,
    pub value: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: u32,
    pub name: String,
    pub months: u32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub id: u32,
    pub name: String,
    pub kind: String,
    pub underlying: String,
    pub active: bool,
}

/// Operation template: a named scaffold with a JSON body filled in when a
/// new operation is drafted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub body: String,
    pub last_modified: CalendarDate,
    pub created_by: String,
    pub active: bool,
}

/// Starting body handed to the template editor.
pub const TEMPLATE_BODY_SKELETON: &str =
    "{\n  \"name\": \"\",\n  \"type\": \"coe\",\n  \"fields\": [],\n  \"validations\": []\n}";

/// All configuration tables, with monotonically assigned row ids.
#[derive(Debug, Default)]
pub struct ReferenceCatalog {
    issuers: Vec<Issuer>,
    assets: Vec<Asset>,
    protections: Vec<ProtectionType>,
    terms: Vec<Term>,
    instruments: Vec<Instrument>,
    templates: Vec<Template>,
    next_id: u32,
}

fn seed_date(year: i32, month: u32, day: u32) -> CalendarDate {
    CalendarDate::new(year, month, day).expect("seed dates are valid")
}

impl ReferenceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-filled with the stock configuration rows.
    pub fn seeded() -> Self {
        let mut catalog = Self::new();

        for name in ["Banco ABC", "Banco XYZ", "Banco DEF"] {
            catalog.add_issuer(name);
        }
        for (name, kind) in [
            ("IBOVESPA", AssetKind::Index),
            ("S&P 500", AssetKind::Index),
            ("NASDAQ", AssetKind::Index),
            ("EUR/USD", AssetKind::Fx),
            ("Ouro", AssetKind::Commodity),
        ] {
            catalog.add_asset(name, kind);
        }
        for value in ["100%", "98%", "95%", "90%"] {
            catalog.add_protection(&format!("Capital Protegido {value}"), value);
        }
        for (name, months) in [
            ("Curto Prazo", 6),
            ("Médio Prazo", 12),
            ("Longo Prazo", 24),
            ("Muito Longo", 36),
        ] {
            catalog.add_term(name, months);
        }
        for (name, underlying) in [
            ("Call Européia", "IBOVESPA"),
            ("Put Européia", "IBOVESPA"),
            ("Call Digital", "S&P 500"),
            ("Call Spread", "NASDAQ"),
            ("Put Spread", "EUR/USD"),
        ] {
            catalog.add_instrument(name, "Opção", underlying);
        }
        for (name, description, modified) in [
            (
                "Autocall Padrão",
                "Template padrão para operações Autocall",
                seed_date(2023, 4, 15),
            ),
            (
                "Capital Protegido",
                "Template para operações com proteção de capital",
                seed_date(2023, 3, 20),
            ),
            (
                "Duplo Índice",
                "Template para operações com dois índices",
                seed_date(2023, 2, 10),
            ),
        ] {
            catalog.add_template(name, description, TEMPLATE_BODY_SKELETON, modified, "Admin");
        }

        catalog
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_issuer(&mut self, name: &str) -> u32 {
        let id = self.next_id();
        self.issuers.push(Issuer {
            id,
            name: name.to_string(),
            active: true,
        });
        id
    }

    pub fn add_asset(&mut self, name: &str, kind: AssetKind) -> u32 {
        let id = self.next_id();
        self.assets.push(Asset {
            id,
            name: name.to_string(),
            kind,
            active: true,
        });
        id
    }

    pub fn add_protection(&mut self, name: &str, value: &str) -> u32 {
        let id = self.next_id();
        self.protections.push(ProtectionType {
            id,
            name: name.to_string(),
            value: value.to_string(),
            active: true,
        });
        id
    }

    pub fn add_term(&mut self, name: &str, months: u32) -> u32 {
        let id = self.next_id();
        self.terms.push(Term {
            id,
            name: name.to_string(),
            months,
            active: true,
        });
        id
    }

    pub fn add_instrument(&mut self, name: &str, kind: &str, underlying: &str) -> u32 {
        let id = self.next_id();
        self.instruments.push(Instrument {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            underlying: underlying.to_string(),
            active: true,
        });
        id
    }

    /// Adds a template row. Returns `None` without inserting when the name
    /// is blank, matching the create guard on the templates screen.
    pub fn add_template(
        &mut self,
        name: &str,
        description: &str,
        body: &str,
        last_modified: CalendarDate,
        created_by: &str,
    ) -> Option<u32> {
        if name.trim().is_empty() {
            return None;
        }
        let id = self.next_id();
        self.templates.push(Template {
            id,
            name: name.to_string(),
            description: description.to_string(),
            body: body.to_string(),
            last_modified,
            created_by: created_by.to_string(),
            active: true,
        });
        Some(id)
    }

    /// Deactivates the row with `id` in whichever table holds it. Returns
    /// false when no row matches.
    pub fn deactivate(&mut self, id: u32) -> bool {
        if let Some(row) = self.issuers.iter_mut().find(|r| r.id == id) {
            row.active = false;
            return true;
        }
        if let Some(row) = self.assets.iter_mut().find(|r| r.id == id) {
            row.active = false;
            return true;
        }
        if let Some(row) = self.protections.iter_mut().find(|r| r.id == id) {
            row.active = false;
            return true;
        }
        if let Some(row) = self.terms.iter_mut().find(|r| r.id == id) {
            row.active = false;
            return true;
        }
        if let Some(row) = self.instruments.iter_mut().find(|r| r.id == id) {
            row.active = false;
            return true;
        }
        if let Some(row) = self.templates.iter_mut().find(|r| r.id == id) {
            row.active = false;
            return true;
        }
        false
    }

    pub fn active_issuers(&self) -> impl Iterator<Item = &Issuer> {
        self.issuers.iter().filter(|r| r.active)
    }
    pub fn active_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(|r| r.active)
    }
    pub fn active_protections(&self) -> impl Iterator<Item = &ProtectionType> {
        self.protections.iter().filter(|r| r.active)
    }
    pub fn active_terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.iter().filter(|r| r.active)
    }
    pub fn active_instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter().filter(|r| r.active)
    }
    pub fn active_templates(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter().filter(|r| r.active)
    }
}
