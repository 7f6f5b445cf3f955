mod ball_ball_collision;
mod cuboid_cuboid_epa;
mod cylinder_cuboid_contact;
mod degenerate_seed;
mod detector_determinism;
mod epsilon_tuning;
mod iteration_cap;
mod touching_shapes;
