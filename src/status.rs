//! Lifecycle status vocabularies, offer types and transition predicates

/// Canonical lifecycle status of an operation. `Editing` is the initial
/// status; `Processed` and `Cancelled` are terminal.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    #[n(0)]
    Editing,
    #[n(1)]
    UnderReview,
    #[n(2)]
    Sent,
    #[n(3)]
    Processed,
    #[n(4)]
    Rejected,
    #[n(5)]
    Cancelled,
}

/// Lifecycle actions a caller may request against an operation.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    #[n(0)]
    Send,
    #[n(1)]
    Cancel,
    #[n(2)]
    EmitCertificate,
}

/// Whether `action` may be applied to an operation currently in `status`.
///
/// Send is only allowed while the operation is editable (fresh or bounced
/// back after rejection). Cancel is allowed from any non-terminal status.
/// Certificate emission carries no precondition of its own.
pub fn can_transition(status: Status, action: Action) -> bool {
    match action {
        Action::Send => matches!(status, Status::Editing | Status::Rejected),
        Action::Cancel => !matches!(status, Status::Processed | Status::Cancelled),
        Action::EmitCertificate => true,
    }
}

impl Status {
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Processed | Status::Cancelled)
    }

    /// Display label as shown on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Status::Editing => "Em edição",
            Status::UnderReview => "Em análise",
            Status::Sent => "Enviado",
            Status::Processed => "Processado",
            Status::Rejected => "Rejeitado",
            Status::Cancelled => "Cancelado",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Em edição" => Some(Status::Editing),
            "Em análise" => Some(Status::UnderReview),
            "Enviado" => Some(Status::Sent),
            "Processado" => Some(Status::Processed),
            "Rejeitado" => Some(Status::Rejected),
            "Cancelado" => Some(Status::Cancelled),
            _ => None,
        }
    }

    /// Badge css classes keyed off the closed status set. The match is
    /// exhaustive so an added status fails the build instead of silently
    /// falling back to a default style.
    pub fn badge_style(self) -> &'static str {
        match self {
            Status::Processed => "bg-green-100 text-green-800",
            Status::UnderReview => "bg-blue-100 text-blue-800",
            Status::Editing => "bg-amber-100 text-amber-800",
            Status::Sent => "bg-purple-100 text-purple-800",
            Status::Rejected => "bg-red-100 text-red-800",
            Status::Cancelled => "bg-gray-100 text-gray-800",
        }
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            Status::Processed => "check-circle",
            Status::UnderReview => "clock",
            Status::Editing => "file-text",
            Status::Sent => "send",
            Status::Rejected => "alert-circle",
            Status::Cancelled => "x-circle",
        }
    }
}

/// Narrower status vocabulary used by the certificate-tracking view. The
/// lifecycle [`Status`] is the system of record; this set is derived from it
/// and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingStatus {
    Pending,
    Pricing,
    CertificateRequested,
    Issued,
    Rejected,
    Cancelled,
}

impl From<Status> for TrackingStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Editing => TrackingStatus::Pricing,
            Status::UnderReview => TrackingStatus::Pending,
            Status::Sent => TrackingStatus::CertificateRequested,
            Status::Processed => TrackingStatus::Issued,
            Status::Rejected => TrackingStatus::Rejected,
            Status::Cancelled => TrackingStatus::Cancelled,
        }
    }
}

impl TrackingStatus {
    pub fn label(self) -> &'static str {
        match self {
            TrackingStatus::Pending => "Pendente",
            TrackingStatus::Pricing => "Precificação",
            TrackingStatus::CertificateRequested => "Certificado Solicitado",
            TrackingStatus::Issued => "Emitido",
            TrackingStatus::Rejected => "Rejeitado",
            TrackingStatus::Cancelled => "Cancelado",
        }
    }

    pub fn badge_style(self) -> &'static str {
        match self {
            TrackingStatus::Issued => "bg-green-100 text-green-800",
            TrackingStatus::Pending => "bg-blue-100 text-blue-800",
            TrackingStatus::Pricing => "bg-amber-100 text-amber-800",
            TrackingStatus::CertificateRequested => "bg-purple-100 text-purple-800",
            TrackingStatus::Rejected => "bg-red-100 text-red-800",
            TrackingStatus::Cancelled => "bg-gray-100 text-gray-800",
        }
    }
}

/// Offer windows for a structured operation.
#[derive(minicbor::Encode, minicbor::Decode, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferType {
    #[n(0)]
    D0,
    #[n(1)]
    TwentyFourSeven,
    #[n(2)]
    Scheduled,
}

/// The third offer type appears under two different labels in the product
/// material ("Agendado" and "BookBuild") and it is unresolved whether those
/// were meant to be the same concept. Both mappings stay available and the
/// deployment picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelSet {
    #[default]
    Agendado,
    BookBuild,
}

impl OfferType {
    pub fn label(self, set: LabelSet) -> &'static str {
        match self {
            OfferType::D0 => "D0",
            OfferType::TwentyFourSeven => "24x7",
            OfferType::Scheduled => match set {
                LabelSet::Agendado => "Agendado",
                LabelSet::BookBuild => "BookBuild",
            },
        }
    }

    /// Parses the wire codes used by the legacy data tables.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "d0" => Some(OfferType::D0),
            "24x7" => Some(OfferType::TwentyFourSeven),
            "agendado" | "scheduled" => Some(OfferType::Scheduled),
            _ => None,
        }
    }

    pub fn badge_style(self) -> &'static str {
        match self {
            OfferType::D0 => "bg-[#FF8801] text-white",
            OfferType::TwentyFourSeven | OfferType::Scheduled => "bg-[#FEC000] text-white",
        }
    }
}
