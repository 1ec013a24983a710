// Domain layer: card model and ports. Nothing here touches the network.

pub mod model;
pub mod ports;
