mod attr;
mod builder;
mod scenario;
mod sim_time;
mod support;
