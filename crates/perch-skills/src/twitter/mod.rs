//! The two Twitter skills.
//!
//! `tweet` signs requests directly with static OAuth1 credentials from the
//! secret store. `tweet-proxy` routes every call through a remote trigger
//! endpoint using a per-room secret obtained via a PIN-based OAuth flow.
//! Both expose the same command set (post, RT, reply, follow, unfollow,
//! length, like); the shared command loop lives in [`commands`] behind the
//! [`commands::TweetTransport`] seam.

pub mod commands;
pub mod direct;
pub mod links;
pub mod oauth1;
pub mod proxy;

pub use direct::TweetSkill;
pub use proxy::TweetProxySkill;
