pub mod channel_name;
