pub mod attached_prompts;
pub mod favorite_set_items;
pub mod favorite_sets;
pub mod prompt_tags;
pub mod prompts;
pub mod tags;
pub mod users;
