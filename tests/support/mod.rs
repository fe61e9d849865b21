//! 内存中的假页面，用于在没有浏览器的情况下驱动分页引擎
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use review_scraper::browser::{PageDriver, Selector};
use review_scraper::error::{BrowserError, BrowserResult};

/// 点击元素之后的效果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Nothing,
    NextPage,
    GoToPage(usize),
}

/// 假 DOM 节点
#[derive(Debug)]
pub struct FakeElement {
    pub selector: Selector,
    pub text: Option<String>,
    pub attrs: HashMap<String, String>,
    pub children: Vec<Arc<FakeElement>>,
    pub visible: bool,
    pub enabled: bool,
    pub action: ClickAction,
}

impl FakeElement {
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            text: None,
            attrs: HashMap::new(),
            children: Vec::new(),
            visible: true,
            enabled: true,
            action: ClickAction::Nothing,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn child(mut self, child: FakeElement) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.action = action;
        self
    }
}

/// 驱动上发生过的事件
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Goto(String),
    Click(ClickAction),
    PointerMove,
    Scroll(f64),
    ChallengeCleared,
}

#[derive(Debug, Default)]
struct State {
    current_page: usize,
    challenge_polls: usize,
    events: Vec<(Instant, Event)>,
}

/// 假页面驱动
pub struct FakeBrowser {
    pages: Vec<Vec<Arc<FakeElement>>>,
    state: Mutex<State>,
    fail_goto: bool,
    fail_pointer: bool,
    started: Instant,
}

impl FakeBrowser {
    pub fn new(pages: Vec<Vec<FakeElement>>) -> Self {
        Self {
            pages: pages
                .into_iter()
                .map(|page| page.into_iter().map(Arc::new).collect())
                .collect(),
            state: Mutex::new(State::default()),
            fail_goto: false,
            fail_pointer: false,
            started: Instant::now(),
        }
    }

    /// 前 `polls` 次查询看不到任何元素，模拟验证页
    pub fn with_challenge(self, polls: usize) -> Self {
        self.state.lock().unwrap().challenge_polls = polls;
        self
    }

    pub fn failing_goto(mut self) -> Self {
        self.fail_goto = true;
        self
    }

    pub fn failing_pointer(mut self) -> Self {
        self.fail_pointer = true;
        self
    }

    pub fn current_page(&self) -> usize {
        self.state.lock().unwrap().current_page
    }

    pub fn events(&self) -> Vec<Event> {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .map(|(_, e)| e.clone())
            .collect()
    }

    /// 事件发生时距离创建驱动的时长
    pub fn event_times(&self) -> Vec<(Duration, Event)> {
        self.state
            .lock()
            .unwrap()
            .events
            .iter()
            .map(|(at, e)| (at.duration_since(self.started), e.clone()))
            .collect()
    }

    pub fn clicks(&self) -> Vec<ClickAction> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Click(action) => Some(action),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: Event) {
        self.state
            .lock()
            .unwrap()
            .events
            .push((Instant::now(), event));
    }

    /// 验证页期间返回 true 并消耗一次
    fn challenged(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.challenge_polls == 0 {
            return false;
        }
        state.challenge_polls -= 1;
        if state.challenge_polls == 0 {
            state
                .events
                .push((Instant::now(), Event::ChallengeCleared));
        }
        true
    }
}

fn collect(nodes: &[Arc<FakeElement>], selector: &Selector, out: &mut Vec<Arc<FakeElement>>) {
    for node in nodes {
        if node.selector == *selector {
            out.push(Arc::clone(node));
        }
        collect(&node.children, selector, out);
    }
}

#[async_trait]
impl PageDriver for FakeBrowser {
    type Node = Arc<FakeElement>;

    async fn goto(&self, url: &str, timeout: Duration) -> BrowserResult<()> {
        self.record(Event::Goto(url.to_string()));
        if self.fail_goto {
            return Err(BrowserError::Timeout {
                what: format!("页面加载 {}", url),
                millis: timeout.as_millis() as u64,
            });
        }
        self.state.lock().unwrap().current_page = 0;
        Ok(())
    }

    async fn wait_for_load(&self) -> BrowserResult<()> {
        Ok(())
    }

    async fn find_all(&self, selector: &Selector) -> BrowserResult<Vec<Self::Node>> {
        if self.challenged() {
            return Ok(Vec::new());
        }
        let current = self.current_page();
        let mut out = Vec::new();
        if let Some(page) = self.pages.get(current) {
            collect(page, selector, &mut out);
        }
        Ok(out)
    }

    async fn find_all_in(
        &self,
        node: &Self::Node,
        selector: &Selector,
    ) -> BrowserResult<Vec<Self::Node>> {
        let mut out = Vec::new();
        collect(&node.children, selector, &mut out);
        Ok(out)
    }

    async fn inner_text(&self, node: &Self::Node) -> BrowserResult<Option<String>> {
        Ok(node.text.clone())
    }

    async fn attribute(&self, node: &Self::Node, name: &str) -> BrowserResult<Option<String>> {
        Ok(node.attrs.get(name).cloned())
    }

    async fn is_visible(&self, node: &Self::Node) -> BrowserResult<bool> {
        Ok(node.visible)
    }

    async fn is_enabled(&self, node: &Self::Node) -> BrowserResult<bool> {
        Ok(node.enabled)
    }

    async fn click(&self, node: &Self::Node) -> BrowserResult<()> {
        self.record(Event::Click(node.action));
        let mut state = self.state.lock().unwrap();
        match node.action {
            ClickAction::Nothing => {}
            ClickAction::NextPage => state.current_page += 1,
            ClickAction::GoToPage(index) => state.current_page = index,
        }
        Ok(())
    }

    async fn move_pointer(&self, _x: f64, _y: f64) -> BrowserResult<()> {
        if self.fail_pointer {
            return Err(BrowserError::Element("pointer detached".to_string()));
        }
        self.record(Event::PointerMove);
        Ok(())
    }

    async fn scroll_by(&self, delta_y: f64) -> BrowserResult<()> {
        self.record(Event::Scroll(delta_y));
        Ok(())
    }
}
