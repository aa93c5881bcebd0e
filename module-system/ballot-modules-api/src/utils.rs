use digest::Digest;

use crate::{Context, Spec};

/// Derives an address by hashing `key` with the context's hasher.
pub fn generate_address<C: Context>(key: &str) -> <C as Spec>::Address {
    let hash: [u8; 32] = <C as Spec>::Hasher::digest(key.as_bytes()).into();
    C::Address::from(hash)
}

/// Derives the address of an instance owned by `owner` under `parent`, as
/// `H(parent ‖ owner)`.
pub fn derive_child_address<C: Context>(
    parent: &<C as Spec>::Address,
    owner: &<C as Spec>::Address,
) -> <C as Spec>::Address {
    let mut hasher = <C as Spec>::Hasher::new();
    hasher.update(parent.as_ref());
    hasher.update(owner.as_ref());
    let hash: [u8; 32] = hasher.finalize().into();
    C::Address::from(hash)
}
