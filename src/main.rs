use yew_image_zoom::components::App;

fn main() {
    yew_image_zoom::util::init_logging();
    yew::Renderer::<App>::new().render();
}
