mod cleanup_steps;
mod draft_steps;
mod session_steps;
mod side_steps;
mod toss_steps;
