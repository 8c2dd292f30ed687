//! Environment-variable wire protocol between the agent and the fetcher.
//!
//! The agent flattens a [`FetchRequest`] into a handful of environment
//! variables; the fetcher process decodes them back. Descriptor order is
//! carried by token position inside `MESOS_EXECUTOR_URIS`.
//!
//! - **Descriptor**: one resource reference plus its post-fetch flags
//! - **Token**: the `<value>+<execBit><extractLetter>` form of a descriptor
//! - **Environment**: encoder/decoder for the full variable set

mod descriptor;
mod environment;
mod token;


pub use descriptor::{FetchRequest, ResourceDescriptor};
pub use environment::{
    ENV_EXECUTOR_URIS, ENV_FRAMEWORKS_HOME, ENV_HADOOP_HOME, ENV_USER, ENV_WORK_DIRECTORY,
    Environment, PROTOCOL_KEYS, decode, encode,
};
pub use token::{decode_tokens, encode_tokens};
