mod acquire;
mod run;


pub use run::run;
