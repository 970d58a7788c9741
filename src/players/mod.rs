mod agent;
mod launch;
mod local;
mod port;
mod process;
mod test_player;

pub use agent::{run_agent, Agent, AgentStep};
pub use launch::{player_main, run_player, PlayerArgs};
pub use local::LocalPlayer;
pub use port::PlayerPort;
pub use process::{spawn_players, ProcessPlayer};
pub use test_player::ScriptedPlayer;
