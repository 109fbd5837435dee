/// State held by an [`AppStore`](super::AppStore).
///
/// `get_state` hands out clones, `PartialEq` decides whether a dispatch
/// notifies, and `Default` seeds `AppStore::default`.
pub trait StoreState: Clone + PartialEq + Default + 'static {}
