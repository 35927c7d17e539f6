fn main() {
    touch_prototypes::run();
}
