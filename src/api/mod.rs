pub mod gamebanana;
