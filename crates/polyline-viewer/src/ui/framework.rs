use eframe::egui;

/*
View 는 model 에 대한 immutable reference 만 받는다.
Model 을 바꾸고 싶으면 command 를 바깥으로 전달하고, 실제 mutation 은 view 를 사용하는 쪽에서 한다.
 */

pub trait ViewContext {
    type Model;
    type Command;

    fn model(&self) -> &Self::Model;
    fn push_command(&mut self, command: Self::Command);
}

pub trait UndoableViewContext {
    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;
    fn undo_hint(&self) -> Option<String>;
    fn redo_hint(&self) -> Option<String>;

    fn request_undo(&mut self);
    fn request_redo(&mut self);
}

pub trait ViewState<CTX> {
    type Event;

    fn interact(&mut self, ui: &mut egui::Ui, ctx: &CTX) -> Vec<Self::Event>;
    fn handle_view_event(&mut self, ctx: &mut CTX, event: Self::Event);

    fn update(&mut self, ui: &mut egui::Ui, ctx: &mut CTX) {
        for event in self.interact(ui, ctx) {
            self.handle_view_event(ctx, event);
        }
    }
}
