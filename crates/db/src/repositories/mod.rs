//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Payment writes take an open
//! transaction instead, so the caller decides when to commit.

pub mod advocacy_repo;
pub mod badge_application_repo;
pub mod book_repo;
pub mod certification_repo;
pub mod contact_message_repo;
pub mod donation_repo;
pub mod legislative_lobby_repo;
pub mod member_repo;

pub use advocacy_repo::AdvocacyRepo;
pub use badge_application_repo::BadgeApplicationRepo;
pub use book_repo::BookRepo;
pub use certification_repo::CertificationRepo;
pub use contact_message_repo::ContactMessageRepo;
pub use donation_repo::DonationRepo;
pub use legislative_lobby_repo::LegislativeLobbyRepo;
pub use member_repo::MemberRepo;
