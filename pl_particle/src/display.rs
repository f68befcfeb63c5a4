use crate::{
  effect::Effect,
  host::{HostError, Player, Server, Value},
  packet::Packet,
  Runtime,
};
use pl_common::{math::Location, util::ThreadPool};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SendError {
  #[error("missing host symbol {0}")]
  Missing(&'static str),
  #[error(transparent)]
  Host(#[from] HostError),
}

/// Sends packets to players. Packets are sent on a pool of worker threads,
/// one task per player. Nothing here ever returns an error: a failed send is
/// logged and dropped.
pub struct Delivery {
  server:  Arc<dyn Server>,
  pool:    ThreadPool,
  use_api: bool,
}

impl Delivery {
  pub fn new(server: Arc<dyn Server>, pool: ThreadPool, use_api: bool) -> Self {
    Delivery { server, pool, use_api }
  }

  pub fn server(&self) -> &Arc<dyn Server> { &self.server }
  /// If set, particles are sent through the host's public api, and packets
  /// are never built.
  pub fn use_api(&self) -> bool { self.use_api }

  /// Sends a particle to all of the given players that are in the same world
  /// as `loc`. In api mode, `packet` is ignored, and the host spawns the
  /// particle itself. Otherwise, nothing is sent if `packet` is `None`.
  pub fn display(
    &self,
    rt: &Arc<Runtime>,
    packet: Option<Packet>,
    effect: Effect,
    loc: &Location,
    amount: i32,
    players: Vec<Player>,
  ) {
    if self.use_api {
      for player in players.iter().filter(|p| loc.same_world(&p.world)) {
        if let Err(e) = self.server.spawn_particle(player, effect.bukkit_name(), loc, amount) {
          warn!("could not spawn {effect} for {}: {e}", player.name);
        }
      }
      return;
    }
    let packet = match packet {
      Some(p) => p,
      None => return,
    };
    for player in players.into_iter().filter(|p| loc.same_world(&p.world)) {
      let rt = rt.clone();
      let packet = packet.clone();
      self.pool.execute(move || {
        if let Err(e) = send(&rt, &player, &packet) {
          warn!("could not send particle to {}: {e}", player.name);
        }
      });
    }
  }

  /// Waits for every queued send to finish.
  pub fn wait(&self) { self.pool.wait() }
}

/// Sends a single packet. This goes through the player's internal handle to
/// find its connection. A player without a connection has logged off, which
/// is not an error.
pub fn send(rt: &Runtime, player: &Player, packet: &Packet) -> Result<(), SendError> {
  let sym = rt.symbols();
  let reflector = rt.intro().reflector();
  let get_handle =
    sym.craft_player_get_handle.as_ref().ok_or(SendError::Missing("CraftPlayer.getHandle"))?;
  let field = sym
    .player_connection_field
    .as_ref()
    .ok_or(SendError::Missing("EntityPlayer.playerConnection"))?;
  let send_packet =
    sym.send_packet.as_ref().ok_or(SendError::Missing("PlayerConnection.sendPacket"))?;

  let handle = reflector.invoke(get_handle, Some(&Value::Object(player.handle.clone())), &[])?;
  let conn = reflector.get_field(field, Some(&handle))?;
  if conn.is_null() {
    return Ok(());
  }
  reflector.invoke(send_packet, Some(&conn), &[packet.value().clone()])?;
  Ok(())
}
