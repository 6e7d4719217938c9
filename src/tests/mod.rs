mod pointers;
mod primitives;
