use ballot_state::Prefix;

use crate::default_context::DefaultContext;
use crate::utils::{derive_child_address, generate_address};
use crate::{Address, Context, ModuleError, ModulePrefix};

#[test]
fn test_module_prefix_layout() {
    let prefix: Prefix = ModulePrefix::new_storage("ballot_election", "Election", "phase").into();
    assert_eq!(prefix.as_bytes(), b"ballot_election/Election/phase/");

    let module: Prefix = ModulePrefix::new_module("ballot_election", "Election").into();
    assert_eq!(module.as_bytes(), b"ballot_election/Election/");
}

#[test]
fn test_scoped_prefixes_differ_per_instance() {
    let first = ModulePrefix::new_storage("m", "M", "s").scoped(&[1; 20]);
    let second = ModulePrefix::new_storage("m", "M", "s").scoped(&[2; 20]);
    assert_ne!(first, second);
    assert!(first.as_bytes().starts_with(b"m/M/s/"));
}

#[test]
fn test_module_prefix_hash_is_stable() {
    let prefix = ModulePrefix::new_module("ballot_registry", "ElectionRegistry");
    let again = ModulePrefix::new_module("ballot_registry", "ElectionRegistry");
    assert_eq!(
        prefix.hash::<DefaultContext>(),
        again.hash::<DefaultContext>()
    );
}

#[test]
fn test_derived_addresses() {
    let parent: Address = generate_address::<DefaultContext>("registry");
    let alice: Address = generate_address::<DefaultContext>("alice");
    let bob: Address = generate_address::<DefaultContext>("bob");

    assert_eq!(alice, generate_address::<DefaultContext>("alice"));
    assert_ne!(alice, bob);
    assert_eq!(
        derive_child_address::<DefaultContext>(&parent, &alice),
        derive_child_address::<DefaultContext>(&parent, &alice)
    );
    assert_ne!(
        derive_child_address::<DefaultContext>(&parent, &alice),
        derive_child_address::<DefaultContext>(&parent, &bob)
    );

    let context = DefaultContext::new(alice);
    assert_eq!(context.sender(), &alice);
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("typed failure")]
struct TypedFailure;

#[test]
fn test_module_error_keeps_typed_source() {
    let err: ModuleError = anyhow::Error::new(TypedFailure).into();
    assert_eq!(err.downcast_ref::<TypedFailure>(), Some(&TypedFailure));
    assert_eq!(err.to_string(), "typed failure");
}
