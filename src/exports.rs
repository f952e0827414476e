pub use {
    hashbrown,
    indexmap,
    itertools,
    log,
    ndarray,
    serde,
    serde_json,
    statrs,
};
