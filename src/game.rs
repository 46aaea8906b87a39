mod bimatrix_game;
pub use self::bimatrix_game::*;

mod solver_config;
pub use self::solver_config::*;

mod label;
pub use self::label::*;

mod tableaux;
pub use self::tableaux::*;

mod lemke_howson;
pub use self::lemke_howson::*;

mod equilibrium;
pub use self::equilibrium::*;

mod equilibrium_store;
pub use self::equilibrium_store::*;

mod all_lemke;
pub use self::all_lemke::*;

mod game_error;
pub use game_error::GameError;
