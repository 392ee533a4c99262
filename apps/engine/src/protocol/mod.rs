//! Wire protocols spoken with remote game servers.

pub mod iss;
