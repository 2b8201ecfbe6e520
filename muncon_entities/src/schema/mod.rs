pub mod application;
pub mod committee;
pub mod committee_country;
pub mod delegation;
pub mod staff_member;
pub mod user;
pub mod user_access_key;

pub mod prelude {
    pub use super::application::Entity as Application;
    pub use super::committee::Entity as Committee;
    pub use super::committee_country::Entity as CommitteeCountry;
    pub use super::delegation::Entity as Delegation;
    pub use super::staff_member::Entity as StaffMember;
    pub use super::user::Entity as User;
    pub use super::user_access_key::Entity as UserAccessKey;
}
