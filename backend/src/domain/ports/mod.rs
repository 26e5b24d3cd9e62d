//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`ChatRelay`]) are consumed by inbound
//! adapters. Driven ports (repositories, [`BlobStore`], and
//! [`ChatCompletionSource`]) are implemented by outbound adapters and expose
//! typed errors so the services can map failures predictably.

mod macros;
pub(crate) use macros::define_port_error;

mod blob_store;
mod chat_completion_source;
mod chat_relay;
mod profile_command;
mod profile_query;
mod profile_repository;
mod wardrobe_command;
mod wardrobe_item_repository;
mod wardrobe_query;

#[cfg(test)]
pub use blob_store::MockBlobStore;
pub use blob_store::{BlobStore, BlobStoreError};
#[cfg(test)]
pub use chat_completion_source::MockChatCompletionSource;
pub use chat_completion_source::{ChatCompletionSource, ChatCompletionSourceError};
#[cfg(test)]
pub use chat_relay::MockChatRelay;
pub use chat_relay::{ChatRelay, FixtureChatRelay};
#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{ProfileCommand, UpsertProfileRequest};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use wardrobe_command::MockWardrobeCommand;
pub use wardrobe_command::{AddItemRequest, WardrobeCommand};
#[cfg(test)]
pub use wardrobe_item_repository::MockWardrobeItemRepository;
pub use wardrobe_item_repository::{WardrobeItemRepository, WardrobeItemRepositoryError};
#[cfg(test)]
pub use wardrobe_query::MockWardrobeQuery;
pub use wardrobe_query::WardrobeQuery;
