pub mod city;
pub mod selection;
