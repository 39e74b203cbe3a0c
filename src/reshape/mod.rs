mod elevate_degree;
mod tension;
